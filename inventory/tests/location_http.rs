use inventory::{InventoryClient, InventoryConfig, InventoryError, Location, PropertyValue};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

async fn mock_operation(server: &mut ServerGuard, matcher: Value, data: Value) -> Mock {
    server
        .mock("POST", "/graph/query")
        .match_body(Matcher::PartialJson(matcher))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "data": data }).to_string())
        .create_async()
        .await
}

async fn mock_location_types(server: &mut ServerGuard) -> Mock {
    mock_operation(
        server,
        json!({"operationName": "LocationTypesQuery"}),
        json!({"locationTypes": {"edges": [
            {"node": {"id": "t-country", "name": "Country", "propertyTypes": []}},
            {"node": {"id": "t-city", "name": "City", "propertyTypes": [
                {"id": "p-pop", "name": "Population", "type": "int"}
            ]}}
        ]}}),
    )
    .await
}

async fn connect(server: &ServerGuard) -> InventoryClient {
    let config = InventoryConfig::default()
        .with_endpoint(format!("{}/graph/query", server.url()))
        .with_timeout(Duration::from_secs(5));
    InventoryClient::connect(config).await.expect("connect")
}

#[tokio::test]
async fn test_connect_loads_location_types() {
    let mut server = mockito::Server::new_async().await;
    let types = mock_location_types(&mut server).await;

    let client = connect(&server).await;

    types.assert_async().await;
    assert_eq!(client.location_type("City").unwrap().id, "t-city");
    assert_eq!(client.location_types().len(), 2);
}

#[tokio::test]
async fn test_get_location_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _types = mock_location_types(&mut server).await;
    let _search = mock_operation(
        &mut server,
        json!({"operationName": "SearchQuery", "variables": {"name": "England"}}),
        json!({"searchForEntity": {"edges": [
            {"node": {"entityId": "1", "entityType": "location", "name": "England", "type": "Country"}}
        ]}}),
    )
    .await;
    let _details = mock_operation(
        &mut server,
        json!({"operationName": "LocationDetailsQuery", "variables": {"id": "1"}}),
        json!({"location": {"id": "1", "name": "England", "externalId": null, "locationType": {"name": "Country"}}}),
    )
    .await;
    let _children = mock_operation(
        &mut server,
        json!({"operationName": "LocationChildrenQuery", "variables": {"id": "1"}}),
        json!({"location": {"children": [
            {"id": "2", "name": "London", "externalId": "ldn", "locationType": {"name": "City"}}
        ]}}),
    )
    .await;

    let client = connect(&server).await;
    let location = client
        .get_location(&[("Country", "England"), ("City", "London")])
        .await
        .unwrap();

    assert_eq!(location, Location::new("2", "London").with_external_id("ldn"));
}

#[tokio::test]
async fn test_add_location_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _types = mock_location_types(&mut server).await;
    let _search = mock_operation(
        &mut server,
        json!({"operationName": "SearchQuery"}),
        json!({"searchForEntity": {"edges": []}}),
    )
    .await;
    let add = mock_operation(
        &mut server,
        json!({
            "operationName": "AddLocationMutation",
            "variables": {"input": {
                "name": "Leeds",
                "type": "t-city",
                "properties": [{"propertyTypeID": "p-pop", "intValue": 800000}]
            }}
        }),
        json!({"addLocation": {"id": "7", "name": "Leeds", "externalId": null, "locationType": {"name": "City"}}}),
    )
    .await;

    let client = connect(&server).await;
    let mut properties = HashMap::new();
    properties.insert("Population".to_string(), PropertyValue::Int(800_000));

    let location = client
        .add_location(&[("City", "Leeds")], &properties, None, None, None)
        .await
        .unwrap();

    add.assert_async().await;
    assert_eq!(location, Location::new("7", "Leeds"));
}

#[tokio::test]
async fn test_remove_failure_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _types = mock_location_types(&mut server).await;
    let _deps = mock_operation(
        &mut server,
        json!({"operationName": "LocationDepsQuery"}),
        json!({"location": {"files": [], "children": [], "surveys": [], "equipments": []}}),
    )
    .await;
    let _remove = server
        .mock("POST", "/graph/query")
        .match_body(Matcher::PartialJson(
            json!({"operationName": "RemoveLocationMutation"}),
        ))
        .with_status(200)
        .with_body(
            json!({
                "data": null,
                "errors": [{"message": "location is in use", "extensions": {"errorId": "R1"}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = connect(&server).await;
    let err = client
        .delete_location(&Location::new("3", "Old Site"))
        .await
        .unwrap_err();

    match err {
        InventoryError::FailedOperation {
            message,
            error_id,
            operation,
            ..
        } => {
            assert_eq!(message, "location is in use");
            assert_eq!(error_id, "R1");
            assert_eq!(operation, "removeLocation");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
