use slm::core::store::ItemStore;
use slm::store::FjallItemStore;
use tracing::info;
use wiremock::ResponseTemplate;

// Adds automatic logging to test
mod test_utils {
    use std::path::{Path, PathBuf};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_rates_mock_server(template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("from", "HUF"))
            .and(query_param("to", "USD,EUR,GBP"))
            .respond_with(template)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(dir: &Path, rates_base_url: &str) -> PathBuf {
        let config_path = dir.join("config.yaml");
        let config_content = format!(
            r#"
base_currency: "HUF"
target_currencies: ["USD", "EUR", "GBP"]
rates:
  base_url: "{rates_base_url}"
data_path: "{data_path}"
"#,
            data_path = dir.join("data").display()
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }
}

const RATES_JSON: &str = r#"{"rates": {"USD": 0.0027, "EUR": 0.0025, "GBP": 0.0021}}"#;

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server =
        test_utils::create_rates_mock_server(ResponseTemplate::new(200).set_body_string(RATES_JSON))
            .await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri());
    let config_path = config_path.to_str().unwrap();

    // Add an item, list it, show its details, toggle and delete it. Each
    // command is a fresh process turn: open store, run, drop.
    let commands = [
        slm::AppCommand::Add {
            name: "Milk".to_string(),
            description: "1L".to_string(),
            price: "500".to_string(),
            category: "Food".to_string(),
            bought: false,
        },
        slm::AppCommand::List { category: None },
        slm::AppCommand::Show { id: 1 },
        slm::AppCommand::Toggle { id: 1 },
        slm::AppCommand::Delete { id: 1 },
        slm::AppCommand::Clear { yes: true },
    ];

    for command in commands {
        let result = slm::run_command(command, Some(config_path)).await;
        assert!(
            result.is_ok(),
            "Command failed with: {:?}",
            result.err()
        );
    }
}

#[test_log::test(tokio::test)]
async fn test_detail_flow_end_to_end() {
    use slm::core::item::NewItem;
    use slm::details::load_details;
    use slm::providers::FrankfurterProvider;

    let mock_server =
        test_utils::create_rates_mock_server(ResponseTemplate::new(200).set_body_string(RATES_JSON))
            .await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = FjallItemStore::open(dir.path().join("items")).expect("Failed to open store");
    let provider = FrankfurterProvider::new(&mock_server.uri());

    let draft = NewItem::parse("Milk", "1L", "500", "Food", false).unwrap();
    let id = store.insert(draft).await.unwrap();
    info!(id, "Inserted test item");

    let targets = vec!["USD".to_string(), "EUR".to_string(), "GBP".to_string()];
    let details = load_details(&store, &provider, id, "HUF", &targets)
        .await
        .unwrap();

    assert_eq!(details.item.name, "Milk");
    assert_eq!(details.item.estimated_price, 500);
    assert_eq!(format!("{:.2}", details.converted("USD").unwrap()), "1.35");
    assert_eq!(format!("{:.2}", details.converted("EUR").unwrap()), "1.25");
    assert_eq!(format!("{:.2}", details.converted("GBP").unwrap()), "1.05");
}

#[test_log::test(tokio::test)]
async fn test_detail_flow_renders_error_state_on_rate_failure() {
    use slm::core::item::NewItem;
    use slm::details::load_details;
    use slm::providers::FrankfurterProvider;

    let mock_server =
        test_utils::create_rates_mock_server(ResponseTemplate::new(500).set_body_string("boom"))
            .await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = FjallItemStore::open(dir.path().join("items")).expect("Failed to open store");
    let provider = FrankfurterProvider::new(&mock_server.uri());

    let draft = NewItem::parse("Milk", "1L", "500", "Food", false).unwrap();
    let id = store.insert(draft).await.unwrap();

    let targets = vec!["USD".to_string(), "EUR".to_string(), "GBP".to_string()];
    let details = load_details(&store, &provider, id, "HUF", &targets)
        .await
        .unwrap();

    // The record still displays, only the conversions are unavailable.
    assert_eq!(details.item.name, "Milk");
    assert!(details.rates.is_err());
    assert!(details.converted("USD").is_none());
}

#[test_log::test(tokio::test)]
async fn test_add_rejects_invalid_input_without_state_change() {
    let mock_server =
        test_utils::create_rates_mock_server(ResponseTemplate::new(200).set_body_string(RATES_JSON))
            .await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri());

    let result = slm::run_command(
        slm::AppCommand::Add {
            name: "Milk".to_string(),
            description: "1L".to_string(),
            price: "not-a-number".to_string(),
            category: "Food".to_string(),
            bought: false,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Validation failure must not be fatal");

    // Nothing was persisted.
    let store =
        FjallItemStore::open(dir.path().join("data").join("items")).expect("Failed to open store");
    assert!(store.subscribe_all().borrow().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_toggle_unknown_id_fails() {
    let mock_server =
        test_utils::create_rates_mock_server(ResponseTemplate::new(200).set_body_string(RATES_JSON))
            .await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri());

    let result = slm::run_command(
        slm::AppCommand::Toggle { id: 99 },
        Some(config_path.to_str().unwrap()),
    )
    .await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("no item with id 99"));
}
