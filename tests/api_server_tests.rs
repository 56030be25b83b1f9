use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use std::sync::Mutex;

use studium::server::configure;
use studium::storage::PlanoStore;

fn store_data() -> web::Data<Mutex<PlanoStore>> {
    web::Data::new(Mutex::new(PlanoStore::em_memoria().expect("banco em memoria")))
}

fn payload_exemplo() -> Value {
    json!({
        "disciplinas": [
            {"id": 1, "titulo": "Constitucional", "importancia": 5, "conhecimento": 1, "horasSemanais": 0, "selecionada": true},
            {"id": 2, "titulo": "Informática", "importancia": 2, "conhecimento": 4, "horasSemanais": 0, "selecionada": true}
        ],
        "dias": [
            {"diaSemana": 1, "horasPlanejadas": 4, "ativo": true},
            {"diaSemana": 3, "horasPlanejadas": 6, "ativo": true}
        ]
    })
}

#[actix_web::test]
async fn distribuir_devolve_metas() {
    let app = test::init_service(App::new().app_data(store_data()).configure(configure)).await;
    let req = test::TestRequest::post().uri("/planejamento/distribuir").set_json(payload_exemplo()).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["distribuido"], json!(true));
    assert_eq!(body["disciplinas"][0]["horasSemanais"], json!(8.5));
    assert_eq!(body["disciplinas"][1]["horasSemanais"], json!(1.5));
}

#[actix_web::test]
async fn gerar_sem_dias_responde_422() {
    let app = test::init_service(App::new().app_data(store_data()).configure(configure)).await;
    let mut payload = payload_exemplo();
    payload["dias"] = json!([{"diaSemana": 1, "horasPlanejadas": 0, "ativo": false}]);
    let req = test::TestRequest::post().uri("/planejamento/gerar").set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Configure pelo menos um dia de estudo"));
    assert_eq!(body["blocos"], json!([]));
}

#[actix_web::test]
async fn gerar_devolve_blocos_e_resumo() {
    let app = test::init_service(App::new().app_data(store_data()).configure(configure)).await;
    let req = test::TestRequest::post().uri("/planejamento/gerar").set_json(payload_exemplo()).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let blocos = body["blocos"].as_array().expect("blocos");
    assert!(!blocos.is_empty());
    assert_eq!(body["resumo"]["horasDisponiveis"], json!(10.0));
    assert!(body["resumo"]["horasAlocadas"].as_f64().unwrap() <= 10.0);
}

#[actix_web::test]
async fn fluxo_completo_substitui_blocos() {
    let app = test::init_service(App::new().app_data(store_data()).configure(configure)).await;

    let req = test::TestRequest::post().uri("/planoEstudo").set_json(json!({"nome": "Concurso"})).to_request();
    let plano: Value = test::call_and_read_body_json(&app, req).await;
    let plano_id = plano["id"].as_i64().unwrap();

    let mut ids = Vec::new();
    for d in payload_exemplo()["disciplinas"].as_array().unwrap() {
        let req = test::TestRequest::post().uri(&format!("/planoEstudo/{}/disciplina", plano_id)).set_json(d).to_request();
        let criada: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(criada["id"].as_i64().unwrap());
    }

    // bloco antigo no sábado, que deve sumir
    let req = test::TestRequest::post()
        .uri("/blocoEstudo")
        .set_json(json!({"planoId": plano_id, "diaSemana": 6, "ordem": 1, "totalHorasPlanejadas": 1.0, "disciplinaId": ids[0]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let mut payload = payload_exemplo();
    payload["disciplinas"][0]["id"] = json!(ids[0]);
    payload["disciplinas"][1]["id"] = json!(ids[1]);
    let req = test::TestRequest::post().uri(&format!("/planoEstudo/{}/planejamento", plano_id)).set_json(payload).to_request();
    let enviado: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(enviado["status"], json!("ok"));
    assert_eq!(enviado["submissao"]["dadosPlano"]["sabado_ativo"], json!(false));

    let req = test::TestRequest::get().uri(&format!("/planoEstudo/{}/planejamento", plano_id)).to_request();
    let estado: Value = test::call_and_read_body_json(&app, req).await;
    let blocos = estado["blocosExistentes"].as_array().unwrap();
    assert!(!blocos.is_empty());
    assert!(blocos.iter().all(|b| b["diaSemana"] != json!(6)));
    assert_eq!(estado["dias"][3]["horasPlanejadas"], json!(6.0));
    assert_eq!(estado["disciplinas"][0]["horasSemanais"], json!(8.5));

    let req = test::TestRequest::get().uri(&format!("/planoEstudo/{}/historico", plano_id)).to_request();
    let historico: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(historico.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn disciplina_inexistente_responde_404() {
    let app = test::init_service(App::new().app_data(store_data()).configure(configure)).await;
    let req = test::TestRequest::put()
        .uri("/disciplina/777")
        .set_json(json!({"horasSemanais": 2.0, "selecionada": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri("/blocoEstudo/777").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn envio_com_disciplina_de_outro_plano_responde_400() {
    let app = test::init_service(App::new().app_data(store_data()).configure(configure)).await;

    let mut planos = Vec::new();
    for nome in ["Tribunais", "Fiscal"] {
        let req = test::TestRequest::post().uri("/planoEstudo").set_json(json!({"nome": nome})).to_request();
        let plano: Value = test::call_and_read_body_json(&app, req).await;
        planos.push(plano["id"].as_i64().unwrap());
    }
    let (plano_a, plano_b) = (planos[0], planos[1]);

    let req = test::TestRequest::post()
        .uri(&format!("/planoEstudo/{}/disciplina", plano_b))
        .set_json(json!({"id": 0, "titulo": "Tributário", "importancia": 4, "conhecimento": 2, "horasSemanais": 7, "selecionada": true}))
        .to_request();
    let alheia: Value = test::call_and_read_body_json(&app, req).await;
    let alheia_id = alheia["id"].as_i64().unwrap();

    let mut payload = payload_exemplo();
    payload["disciplinas"] = json!([
        {"id": alheia_id, "titulo": "Tributário", "importancia": 4, "conhecimento": 2, "horasSemanais": 0, "selecionada": true}
    ]);
    let req = test::TestRequest::post().uri(&format!("/planoEstudo/{}/planejamento", plano_a)).set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // nada foi gravado no plano B
    let req = test::TestRequest::get().uri(&format!("/planoEstudo/{}/planejamento", plano_b)).to_request();
    let estado: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(estado["disciplinas"][0]["horasSemanais"], json!(7.0));

    let req = test::TestRequest::get().uri(&format!("/planoEstudo/{}/historico", plano_a)).to_request();
    let historico: Value = test::call_and_read_body_json(&app, req).await;
    assert!(historico.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn disciplina_repetida_responde_400() {
    let app = test::init_service(App::new().app_data(store_data()).configure(configure)).await;
    let mut payload = payload_exemplo();
    payload["disciplinas"][1]["id"] = json!(1);
    let req = test::TestRequest::post().uri("/planejamento/gerar").set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("disciplina repetida: 1"));
}
