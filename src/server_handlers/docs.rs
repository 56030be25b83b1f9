use actix_web::{HttpResponse, Responder};
use serde_json::json;

/// GET /help
pub async fn help_handler() -> impl Responder {
    let exemplo = json!({
        "disciplinas": [
            {"id": 1, "titulo": "Direito Constitucional", "cor": "#2563eb", "importancia": 5, "conhecimento": 1, "horasSemanais": 0, "selecionada": true},
            {"id": 2, "titulo": "Informática", "cor": "#16a34a", "importancia": 2, "conhecimento": 4, "horasSemanais": 0, "selecionada": true}
        ],
        "dias": [
            {"diaSemana": 1, "horasPlanejadas": 4, "ativo": true, "blocos": []},
            {"diaSemana": 3, "horasPlanejadas": 6, "ativo": true, "blocos": []}
        ]
    });

    HttpResponse::Ok().json(json!({
        "description": "API do planejador semanal. POST /planejamento/gerar distribui as horas semanais pelo peso importancia*(6-conhecimento) e gera blocos de 1.5h, 1h ou 0.5h por dia.",
        "post_example": exemplo,
        "rotas": [
            "POST /planejamento/distribuir",
            "POST /planejamento/gerar",
            "POST /planoEstudo",
            "GET /planoEstudo/{id}/planejamento",
            "POST /planoEstudo/{id}/planejamento",
            "GET /planoEstudo/{id}/historico",
            "PUT /planoEstudo/{id}",
            "POST /planoEstudo/{id}/disciplina",
            "PUT /disciplina/{id}",
            "POST /blocoEstudo",
            "DELETE /blocoEstudo/{id}"
        ],
        "dias": "diaSemana 0 = domingo ... 6 = sabado"
    }))
}
