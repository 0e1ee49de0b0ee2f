//! Context formatting and template composition.

use finqa_rag::document::{Chunk, ReportSource, SearchResult};
use finqa_rag::prompt;

fn result(source: ReportSource, text: &str) -> SearchResult {
    SearchResult {
        chunk: Chunk {
            id: "c_0".into(),
            text: text.into(),
            embedding: Vec::new(),
            source,
            heading_trail: Vec::new(),
            seq: 0,
        },
        score: 1.0,
    }
}

#[test]
fn context_labels_the_known_reports() {
    let results = vec![
        result(ReportSource::Financial, "EBITDA Ajustado de R$ 62,3 bilhões."),
        result(ReportSource::Administrative, "Investimentos de US$ 16 bilhões."),
    ];
    let context = prompt::format_context(&results);

    assert!(context.starts_with("**Relatório de Desempenho 1T25**\n"));
    assert!(context.contains("**Relatório da Administração 2024**\n"));
    assert!(context.contains("EBITDA Ajustado de R$ 62,3 bilhões."));
}

#[test]
fn context_repeats_labels_for_repeated_sources() {
    // The context block is deliberately not deduplicated; the orchestrator's
    // source list is.
    let results = vec![
        result(ReportSource::Financial, "primeiro trecho"),
        result(ReportSource::Financial, "segundo trecho"),
    ];
    let context = prompt::format_context(&results);

    assert_eq!(context.matches("**Relatório de Desempenho 1T25**").count(), 2);
    assert_eq!(context.split("\n\n").count(), 2);
}

#[test]
fn unknown_sources_pass_their_raw_identifier_through() {
    let results = vec![result(ReportSource::Other("nota-explicativa.txt".into()), "texto")];
    let context = prompt::format_context(&results);
    assert!(context.starts_with("**nota-explicativa.txt**\n"));
}

#[test]
fn compose_fills_both_placeholders() {
    let composed = prompt::compose("CONTEXTO AQUI", "Qual foi o lucro líquido?");

    assert!(composed.contains("CONTEXTO AQUI"));
    assert!(composed.contains("**PERGUNTA:** Qual foi o lucro líquido?"));
    assert!(!composed.contains("{context}"));
    assert!(!composed.contains("{question}"));
}

#[test]
fn template_mandates_the_structured_output_contract() {
    // The output layout is prompt-enforced; the markers the evaluators look
    // for must be present in the instructions.
    for marker in ["**RESPOSTA:**", "**FONTES:**", "**CONFIANÇA:**", "**LIMITAÇÕES:**",
        "**PERÍODO DE REFERÊNCIA:**"]
    {
        assert!(prompt::SYSTEM_PROMPT.contains(marker), "template missing {marker}");
    }
    assert!(prompt::SYSTEM_PROMPT.contains("NÃO forneça conselhos de investimento"));
}
