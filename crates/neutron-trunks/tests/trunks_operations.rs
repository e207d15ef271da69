//! End-to-end tests for trunk operations against a mock networking service.
//!
//! Request bodies and canned responses live in `tests/fixtures`.

use neutron_core::Error;
use neutron_trunks::{
    extract_trunks, AddSubportsOpts, CreateOpts, ListOpts, RemoveSubport, RemoveSubportsOpts,
    Subport, Trunk, TrunksClient, TrunksClientBuilder, UpdateOpts,
};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "cbc36478b0bd8e67e89469c7749d4127";
const TRUNK_ID: &str = "f6a9718c-5a64-43e3-944f-4deccad8e78c";
const PARENT_PORT: &str = "c373d2fa-3d3b-4492-924c-aff54dea19b6";

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a JSON fixture from disk.
fn fixture(name: &str) -> Value {
    let fixture_path = fixtures_dir().join(name);
    let raw = fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&raw)
        .unwrap_or_else(|e| panic!("Fixture {} is not valid JSON: {}", name, e))
}

fn expected_trunks() -> Vec<Trunk> {
    let list = fixture("list_response.json");
    serde_json::from_value(list["trunks"].clone()).unwrap()
}

fn expected_subports() -> Vec<Subport> {
    vec![
        Subport::vlan("28e452d7-4f8a-4be4-b1e6-7f3db4c0430b", 1),
        Subport::vlan("4c8b2bff-9824-4d4c-9b60-b3f6621b2bab", 2),
    ]
}

fn port_ids(subports: &[Subport]) -> HashSet<String> {
    subports.iter().map(|s| s.port_id.clone()).collect()
}

fn client(server: &MockServer) -> TrunksClient {
    TrunksClientBuilder::new(server.uri())
        .unwrap()
        .with_token(TOKEN)
        .build()
        .unwrap()
}

fn trunk_path() -> String {
    format!("/v2.0/trunks/{TRUNK_ID}")
}

#[tokio::test]
async fn create_validates_before_sending_and_decodes_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.0/trunks"))
        .and(header("X-Auth-Token", TOKEN))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .and(body_json(fixture("create_request.json")))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"trunk": fixture("trunk_with_subports.json")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut options = CreateOpts {
        name: Some("gophertrunk".into()),
        description: Some("Trunk created by gophercloud".into()),
        admin_state_up: Some(true),
        sub_ports: expected_subports(),
        ..CreateOpts::default()
    };

    let err = client.create(&options).await.extract().unwrap_err();
    assert!(err.is_validation(), "missing parent port must be rejected");
    options.port_id = PARENT_PORT.into();

    options.sub_ports.push(Subport {
        port_id: "edfe3bca-7dcc-4b7a-a784-fac91cf62c31".into(),
        ..Subport::default()
    });
    let err = client.create(&options).await.extract().unwrap_err();
    assert!(err.is_validation(), "malformed subport must be rejected");
    options.sub_ports.truncate(2);

    let trunk = client.create(&options).await.extract().unwrap();
    assert_eq!(trunk.status, "ACTIVE");
    assert_eq!(trunk, expected_trunks()[1]);
    assert_eq!(trunk.sub_ports, options.sub_ports);
    assert_eq!(trunk.port_id, PARENT_PORT);
}

#[tokio::test]
async fn create_without_subports() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.0/trunks"))
        .and(body_json(json!({
            "trunk": {
                "admin_state_up": true,
                "description": "Trunk created by gophercloud",
                "name": "gophertrunk",
                "port_id": PARENT_PORT,
                "sub_ports": []
            }
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"trunk": fixture("trunk_without_subports.json")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let options = CreateOpts {
        name: Some("gophertrunk".into()),
        description: Some("Trunk created by gophercloud".into()),
        admin_state_up: Some(true),
        ..CreateOpts::new(PARENT_PORT)
    };
    let trunk = client(&server).create(&options).await.extract().unwrap();
    assert_eq!(trunk.status, "ACTIVE");
    assert!(trunk.sub_ports.is_empty());
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(trunk_path()))
        .and(header("X-Auth-Token", TOKEN))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).delete(TRUNK_ID).await;
    assert!(result.err().is_none());
}

#[tokio::test]
async fn list_yields_single_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/trunks"))
        .and(header("X-Auth-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("list_response.json")))
        .expect(1)
        .mount(&server)
        .await;

    let mut pager = client(&server).list(&ListOpts::default());
    let mut count = 0;
    while let Some(page) = pager.next_page().await.unwrap() {
        count += 1;
        let actual = extract_trunks(&page).unwrap();
        assert_eq!(actual, expected_trunks());
    }

    assert_eq!(count, 1, "expected exactly one page");
    assert!(pager.is_exhausted());
}

#[tokio::test]
async fn list_reports_malformed_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/trunks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trunks": fixture("trunk_with_subports.json")
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let mut pager = client.list(&ListOpts::default());
    assert!(matches!(
        pager.next_page().await,
        Err(Error::DecodeError(_))
    ));
    assert!(pager.is_exhausted());

    let all = client.list(&ListOpts::default()).all_items::<Trunk>().await;
    assert!(matches!(all, Err(Error::DecodeError(_))));
}

#[tokio::test]
async fn get_is_repeatable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(trunk_path()))
        .and(header("X-Auth-Token", TOKEN))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"trunk": fixture("trunk_with_subports.json")})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let first = client.get(TRUNK_ID).await.extract().unwrap();
    let second = client.get(TRUNK_ID).await.extract().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, expected_trunks()[1]);
}

#[tokio::test]
async fn update_sends_supplied_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(trunk_path()))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .and(body_json(fixture("update_request.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("update_response.json")))
        .expect(1)
        .mount(&server)
        .await;

    let options = UpdateOpts {
        name: Some("updated_gophertrunk".into()),
        description: Some("gophertrunk updated by gophercloud".into()),
        admin_state_up: Some(false),
    };
    let trunk = client(&server)
        .update(TRUNK_ID, &options)
        .await
        .extract()
        .unwrap();

    assert_eq!(trunk.name, "updated_gophertrunk");
    assert!(!trunk.admin_state_up);
    assert_eq!(trunk.description, "gophertrunk updated by gophercloud");
}

#[tokio::test]
async fn add_subports_reflects_added_set() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{}/add_subports", trunk_path())))
        .and(header("X-Auth-Token", TOKEN))
        .and(header("Content-Type", "application/json"))
        .and(body_json(fixture("add_subports_request.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("trunk_with_subports.json")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let faulty = AddSubportsOpts {
        sub_ports: vec![Subport {
            port_id: "4b6baa40-8131-4212-85f9-b3636a6dc77a".into(),
            ..Subport::default()
        }],
    };
    let err = client
        .add_subports(TRUNK_ID, &faulty)
        .await
        .extract()
        .unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));

    let before: Trunk = serde_json::from_value(fixture("trunk_without_subports.json")).unwrap();
    let opts = AddSubportsOpts {
        sub_ports: expected_subports(),
    };
    let trunk = client
        .add_subports(TRUNK_ID, &opts)
        .await
        .extract()
        .unwrap();

    let mut expected = port_ids(&before.sub_ports);
    expected.extend(port_ids(&opts.sub_ports));
    assert_eq!(port_ids(&trunk.sub_ports), expected);
    assert_eq!(trunk.sub_ports, expected_subports());
}

#[tokio::test]
async fn remove_subports_reflects_removed_set() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{}/remove_subports", trunk_path())))
        .and(header("X-Auth-Token", TOKEN))
        .and(header("Content-Type", "application/json"))
        .and(body_json(fixture("remove_subports_request.json")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fixture("trunk_without_subports.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let bad = RemoveSubportsOpts {
        sub_ports: vec![
            RemoveSubport::default(),
            RemoveSubport::new("4c8b2bff-9824-4d4c-9b60-b3f6621b2bab"),
        ],
    };
    let err = client
        .remove_subports(TRUNK_ID, &bad)
        .await
        .extract()
        .unwrap_err();
    assert!(err.is_validation());

    let before: Trunk = serde_json::from_value(fixture("trunk_with_subports.json")).unwrap();
    let opts = RemoveSubportsOpts {
        sub_ports: vec![
            RemoveSubport::new("28e452d7-4f8a-4be4-b1e6-7f3db4c0430b"),
            RemoveSubport::new("4c8b2bff-9824-4d4c-9b60-b3f6621b2bab"),
        ],
    };
    let trunk = client
        .remove_subports(TRUNK_ID, &opts)
        .await
        .extract()
        .unwrap();

    let removed: HashSet<String> = opts.sub_ports.iter().map(|s| s.port_id.clone()).collect();
    let expected: HashSet<String> = port_ids(&before.sub_ports)
        .difference(&removed)
        .cloned()
        .collect();
    assert_eq!(port_ids(&trunk.sub_ports), expected);
}

#[tokio::test]
async fn get_subports_lists_attached_ports() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/get_subports", trunk_path())))
        .and(header("X-Auth-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("get_subports_response.json")))
        .expect(1)
        .mount(&server)
        .await;

    let subports = client(&server)
        .get_subports(TRUNK_ID)
        .await
        .extract()
        .unwrap();
    assert_eq!(subports, expected_subports());
}

#[tokio::test]
async fn decode_errors_surface_only_on_extract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(trunk_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client(&server).get(TRUNK_ID).await;
    assert!(result.err().is_none());
    assert!(matches!(result.extract(), Err(Error::DecodeError(_))));
}

#[tokio::test]
async fn transport_errors_are_passed_through() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(401).set_body_string("Authentication required"))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.get(TRUNK_ID).await.extract().unwrap_err();
    assert_eq!(err, Error::Unauthorized("Authentication required".into()));

    let mut pager = client.list(&ListOpts::default());
    assert!(matches!(
        pager.next_page().await,
        Err(Error::Unauthorized(_))
    ));
}

#[tokio::test]
async fn symmetric_operations_hit_the_same_url() {
    let server = MockServer::start().await;
    let id = uuid::Uuid::new_v4().to_string();
    let resource = format!("/v2.0/trunks/{id}");

    Mock::given(method("GET"))
        .and(path(resource.as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"trunk": fixture("trunk_with_subports.json")})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(resource.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.get(&id).await.err().is_none());
    assert!(client.delete(&id).await.into_result().is_ok());
}
