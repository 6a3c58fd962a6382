#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeMap;

use kvstats_core::error::ErrorKind;
use kvstats_gateway::config::{self, BindingConfig};
use kvstats_gateway::env::{Env, BINDING_CANDIDATES};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:8080"
  stats_rout: "/api/stats" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), ErrorKind::Config.as_str());
}

#[test]
fn deny_unknown_binding_fields() {
    let bad = r#"
version: 1
bindings:
  - name: KV_BINDING
    kind: memory
    entrys: {}
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:8080");
    assert_eq!(cfg.gateway.stats_route, "/api/stats");
    assert!(cfg.bindings.is_empty());
}

#[test]
fn rejects_bad_version_listen_and_route() {
    assert!(config::load_from_str("version: 2\n").is_err());
    assert!(config::load_from_str("version: 1\ngateway:\n  listen: nowhere\n").is_err());
    assert!(config::load_from_str("version: 1\ngateway:\n  stats_route: api/stats\n").is_err());
}

#[test]
fn rejects_duplicate_and_incomplete_bindings() {
    let dup = r#"
version: 1
bindings:
  - { name: KV_BINDING, kind: memory }
  - { name: KV_BINDING, kind: memory }
"#;
    let err = config::load_from_str(dup).expect_err("duplicate must fail");
    assert!(err.to_string().contains("duplicate binding name"));

    let no_ids = r#"
version: 1
bindings:
  - { name: STATS_KV, kind: cloudflare, account_id: "", namespace_id: "ns" }
"#;
    assert!(config::load_from_str(no_ids).is_err());

    let slow = r#"
version: 1
bindings:
  - { name: STATS_KV, kind: cloudflare, account_id: "a", namespace_id: "ns", timeout_ms: 120000 }
"#;
    assert!(config::load_from_str(slow).is_err());
}

#[test]
fn cloudflare_binding_defaults() {
    let ok = r#"
version: 1
bindings:
  - name: STATS_KV
    kind: cloudflare
    account_id: "acct"
    namespace_id: "ns"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    match &cfg.bindings[0] {
        BindingConfig::Cloudflare {
            api_token_env,
            api_base,
            timeout_ms,
            ..
        } => {
            assert_eq!(api_token_env, "CLOUDFLARE_API_TOKEN");
            assert_eq!(api_base, "https://api.cloudflare.com/client/v4");
            assert_eq!(*timeout_ms, 10000);
        }
        other => panic!("unexpected binding: {other:?}"),
    }
}

#[test]
fn cloudflare_binding_needs_token_variable() {
    let ok = r#"
version: 1
bindings:
  - { name: STATS_KV, kind: cloudflare, account_id: "acct", namespace_id: "ns" }
"#;
    let cfg = config::load_from_str(ok).unwrap();

    let err = Env::from_config(&cfg, &BTreeMap::new()).err().expect("missing token");
    assert!(err.to_string().contains("CLOUDFLARE_API_TOKEN"));

    let vars = BTreeMap::from([("CLOUDFLARE_API_TOKEN".to_string(), "tok".to_string())]);
    let env = Env::from_config(&cfg, &vars).unwrap();
    let (name, store) = env.resolve(&BINDING_CANDIDATES).unwrap();
    assert_eq!(name, "STATS_KV");
    assert_eq!(store.kind(), "cloudflare");
}
