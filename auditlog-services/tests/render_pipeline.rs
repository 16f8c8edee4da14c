use auditlog_core::parse_events;
use auditlog_services::adapters::{BaseAdapter, RendererRegistry};
use auditlog_services::config::Settings;

const RECORDS: &str = r#"
{"code":"T2000I","uid":"u1","event":"session.start","user":"alice","sid":"9f1c","time":"2023-02-10T08:00:00Z"}
{"code":"T2004I","event":"session.end","user":"alice","sid":"9f1c","interactive":true,"server_hostname":"bastion","session_start":"2023-02-10T08:00:00Z","session_stop":"2023-02-10T10:00:00Z","time":"2023-02-10T10:00:00Z"}
{"code":"ZZ999","event":"mystery","time":"2023-02-10T10:01:00Z"}
"#;

#[test]
fn table_output() {
    let settings = Settings::default();
    let registry = RendererRegistry::with_defaults(&settings);
    let adapter = BaseAdapter::from_registry(settings, &registry).unwrap();

    let events = parse_events(RECORDS).unwrap();
    assert_eq!(events[1].id, "session.end:2023-02-10T10:00:00Z");

    let out = adapter.render(events);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].contains("User [alice] has started a session [9f1c]"));
    assert!(lines[2].contains("lasting 2 hours [9f1c] on node [bastion]"));
    assert!(lines[3].contains("Unknown"));
}

#[test]
fn json_output_skipping_unknown() {
    let settings = Settings {
        output_format: "json".to_string(),
        skip_unknown: true,
        ..Settings::default()
    };
    let registry = RendererRegistry::with_defaults(&settings);
    let adapter = BaseAdapter::from_registry(settings, &registry).unwrap();

    let out = adapter.render(parse_events(RECORDS).unwrap());
    let docs: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["id"], "u1");
    assert_eq!(docs[1]["codeDesc"], "Session Ended");
    assert_eq!(docs[1]["raw"]["server_hostname"], "bastion");
}
