use serde_json::json;
use stock_view_wasm::config::AppConfig;
use stock_view_wasm::domain::chart::{ChartCategory, responsive_layout};

#[test]
fn price_layout_snapshot() {
    let layout = json!({ "title": { "text": "AAPL" } });
    let merged = responsive_layout(ChartCategory::Price, layout.as_object().unwrap());

    insta::with_settings!({ sort_maps => true }, {
        insta::assert_json_snapshot!(merged, @r###"
        {
          "autosize": true,
          "margin": {
            "pad": 5
          },
          "modebar": {
            "activecolor": "#007bff",
            "orientation": "v"
          },
          "responsive": true,
          "title": {
            "text": "AAPL"
          },
          "xaxis": {
            "autorange": true,
            "rangeslider": {
              "visible": false
            }
          },
          "yaxis": {
            "autorange": true,
            "fixedrange": false
          }
        }
        "###);
    });
}

#[test]
fn page_config_overrides_subset() {
    let config = AppConfig::from_json(r#"{ "analyze_endpoint": "/api/analyze", "log_level": "warn" }"#).unwrap();

    assert_eq!(config.analyze_endpoint, "/api/analyze");
    assert_eq!(config.alert_auto_hide_ms, 5_000);

    let plot = serde_json::to_value(&config.plot).unwrap();
    assert_eq!(plot["modeBarButtonsToAdd"], json!(["toImage", "resetScale2d"]));
    assert_eq!(plot["displaylogo"], json!(false));
}

#[test]
fn malformed_config_is_rejected() {
    assert!(AppConfig::from_json("{ not json").is_err());
    assert_eq!(AppConfig::from_json("   ").unwrap(), AppConfig::default());
}
