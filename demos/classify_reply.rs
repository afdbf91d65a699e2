//! Example: classifying model replies with MockBackend, no API key needed.
//!
//! Run with: `cargo run --example classify_reply`

use infosec_assistant::{Assistant, MockBackend, Outcome};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // One canned reply per outcome the front-end can receive
    let mock = MockBackend::new(vec![
        "ИБ:\nКратко: Злоумышленник выдаёт себя за банк.\nУгроза: Фишинг\nКонтроли: MFA; фильтрация почты\nКатегории: административные=обучение; технические=DMARC, SPF\nРекомендации: проверять отправителя\nСтандарты: ISO 27001 A.5.1".to_string(),
        "НЕ ИБ".to_string(),
        "Извините, не могу ответить в нужном формате.".to_string(),
    ]);

    let assistant = Assistant::builder("http://unused")
        .backend(Arc::new(mock))
        .build()?;

    for query in ["Письмо от «банка» со ссылкой", "Рецепт борща", "Что такое SOC?"] {
        let outcome = assistant.answer(query).await;
        println!("{query} -> {}", outcome.kind());
        if let Outcome::Structured(ref record) = outcome {
            println!("  threat: {}", record.normalized_threat);
            for (category, items) in &record.control_categories {
                println!("  {category}: {}", items.join(", "));
            }
        }
        println!("  {}", serde_json::to_string_pretty(&outcome.to_json())?);
    }

    Ok(())
}
