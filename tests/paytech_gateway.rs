use mockito::Matcher;
use payment_checkout::config::GatewayConfig;
use payment_checkout::error::GatewayError;
use payment_checkout::gateways::paytech::PaytechGateway;
use payment_checkout::gateways::PaymentGateway;
use rust_decimal_macros::dec;
use serde_json::json;
use std::io::Write;
use std::time::Duration;

fn gateway(base_url: String, timeout: Duration) -> PaytechGateway {
    PaytechGateway::new(GatewayConfig::new(base_url, "test-token", timeout))
}

#[tokio::test]
async fn sends_auth_idempotency_header_and_fixed_body() {
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("POST", "/payments")
        .match_header("authorization", "Bearer test-token")
        .match_header("content-type", "application/json")
        .match_header("idempotency-key", "key-1")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({
                "paymentType": "DEPOSIT",
                "currency": "EUR",
                "customer": {
                    "email": "customer@example.com",
                    "firstName": "John",
                    "lastName": "Sweet-Escott"
                }
            })),
            Matcher::Regex(r#""amount":100\.00[,}]"#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"timestamp":"2024-01-01T00:00:00","status":200,
                "result":{"id":"P1","redirectUrl":"https://r","status":"CHECKOUT"}}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let result = gateway(server.url(), Duration::from_secs(5))
        .create_payment(dec!(100.00), "key-1")
        .await
        .unwrap();

    assert_eq!(result.id.as_deref(), Some("P1"));
    assert_eq!(result.redirect_url.as_deref(), Some("https://r"));
    assert_eq!(result.status.as_deref(), Some("CHECKOUT"));
    m.assert_async().await;
}

#[tokio::test]
async fn large_amount_is_sent_without_rounding() {
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("POST", "/payments")
        .match_body(Matcher::Regex(
            r#""amount":12345678901234567\.89[,}]"#.to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"result":{"id":"P9","redirectUrl":"https://r"}}"#)
        .expect(1)
        .create_async()
        .await;

    gateway(server.url(), Duration::from_secs(5))
        .create_payment(dec!(12345678901234567.89), "key-big")
        .await
        .unwrap();
    m.assert_async().await;
}

#[tokio::test]
async fn non_2xx_carries_response_body() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/payments")
        .with_status(400)
        .with_body(r#"{"error":"amount too large"}"#)
        .create_async()
        .await;

    let err = gateway(server.url(), Duration::from_secs(5))
        .create_payment(dec!(10), "key-2")
        .await
        .unwrap_err();

    match err {
        GatewayError::CallFailed { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, r#"{"error":"amount too large"}"#);
        }
        other => panic!("expected CallFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_result_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/payments")
        .with_status(200)
        .with_body(r#"{"timestamp":"2024-01-01T00:00:00","status":200}"#)
        .create_async()
        .await;

    let err = gateway(server.url(), Duration::from_secs(5))
        .create_payment(dec!(10), "key-3")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::InvalidResponse(_)));
}

#[tokio::test]
async fn empty_or_garbage_body_is_invalid_response() {
    for body in ["", "not json"] {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/payments")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let err = gateway(server.url(), Duration::from_secs(5))
            .create_payment(dec!(10), "key-4")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)), "body {body:?}");
    }
}

#[tokio::test]
async fn slow_gateway_times_out() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/payments")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(800));
            w.write_all(br#"{"result":{"id":"P1","redirectUrl":"https://r"}}"#)
        })
        .create_async()
        .await;

    let err = gateway(server.url(), Duration::from_millis(100))
        .create_payment(dec!(10), "key-5")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::TimedOut(d) if d == Duration::from_millis(100)));
}

#[tokio::test]
async fn slow_error_body_times_out() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/payments")
        .with_status(503)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(800));
            w.write_all(b"maintenance")
        })
        .create_async()
        .await;

    let err = gateway(server.url(), Duration::from_millis(100))
        .create_payment(dec!(10), "key-7")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::TimedOut(_)), "got {err:?}");
}

#[tokio::test]
async fn connection_refused_is_unavailable() {
    let err = gateway("http://127.0.0.1:1".to_string(), Duration::from_secs(2))
        .create_payment(dec!(10), "key-6")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Unavailable(_)));
}
