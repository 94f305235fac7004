#![allow(clippy::unwrap_used, reason = "Do not need additional syntax for setting up tests")]

mod markets {
    use httpmock::{Method::GET, MockServer};
    use polymarket_mcp::error::Kind;
    use polymarket_mcp::gamma::Client;
    use polymarket_mcp::gamma::types::request::{MarketBySlugRequest, MarketsRequest};
    use reqwest::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn markets_should_succeed() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = Client::new(&server.base_url())?;

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/markets")
                .query_param("limit", "5")
                .query_param("order", "volumeNum");
            then.status(StatusCode::OK).json_body(json!([
                {
                    "id": 12,
                    "conditionId": "0x01",
                    "question": "Will it snow?",
                    "slug": "will-it-snow",
                    "outcomes": "[\"Yes\",\"No\"]",
                    "volume": 1234.5,
                    "liquidity": "99",
                    "active": true,
                    "closed": null
                }
            ]));
        });

        let markets = client.markets(&MarketsRequest::top_by_volume(5, 0)).await?;

        mock.assert();
        assert_eq!(markets.len(), 1);
        let market = &markets[0];
        assert_eq!(market.id.as_deref(), Some("12"));
        assert_eq!(market.slug.as_deref(), Some("will-it-snow"));
        assert_eq!(market.volume.as_deref(), Some("1234.5"));
        assert_eq!(market.liquidity.as_deref(), Some("99"));
        assert!(market.active, "active");
        assert!(!market.closed, "null closed defaults to false");

        Ok(())
    }

    #[tokio::test]
    async fn market_by_slug_should_succeed() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = Client::new(&server.base_url())?;

        let mock = server.mock(|when, then| {
            when.method(GET).path("/markets/slug/will-it-snow");
            then.status(StatusCode::OK)
                .json_body(json!({ "conditionId": "0x01", "slug": "will-it-snow" }));
        });

        let request = MarketBySlugRequest::builder().slug("will-it-snow").build();
        let market = client.market_by_slug(&request).await?;

        mock.assert();
        assert_eq!(market.condition_id.as_deref(), Some("0x01"));

        Ok(())
    }

    #[tokio::test]
    async fn market_by_slug_should_escape_the_slug() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = Client::new(&server.base_url())?;

        let escaped = server.mock(|when, then| {
            when.method(GET).path("/markets/slug/odd%3Fslug%23x%2F..%2Fy");
            then.status(StatusCode::OK)
                .json_body(json!({ "conditionId": "0x05", "slug": "odd?slug#x/../y" }));
        });
        let bare = server.mock(|when, then| {
            when.method(GET).path("/markets/slug/odd");
            then.status(StatusCode::OK).json_body(json!({ "conditionId": "0xbad" }));
        });

        let request = MarketBySlugRequest::builder().slug("odd?slug#x/../y").build();
        let market = client.market_by_slug(&request).await?;

        escaped.assert();
        bare.assert_calls(0);
        assert_eq!(market.condition_id.as_deref(), Some("0x05"));

        Ok(())
    }

    #[tokio::test]
    async fn market_by_slug_should_report_404() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = Client::new(&server.base_url())?;

        let mock = server.mock(|when, then| {
            when.method(GET).path("/markets/slug/nope");
            then.status(StatusCode::NOT_FOUND).body("not found");
        });

        let request = MarketBySlugRequest::builder().slug("nope").build();
        let err = client.market_by_slug(&request).await.unwrap_err();

        mock.assert();
        assert_eq!(err.kind(), Kind::Status);
        assert!(err.is_not_found(), "{err}");

        Ok(())
    }

    #[tokio::test]
    async fn market_by_condition_id_should_treat_empty_list_as_not_found() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = Client::new(&server.base_url())?;

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/markets")
                .query_param("condition_ids", "0xmissing");
            then.status(StatusCode::OK).json_body(json!([]));
        });

        let err = client.market_by_condition_id("0xmissing").await.unwrap_err();

        mock.assert();
        assert!(err.is_not_found(), "{err}");

        Ok(())
    }

    #[tokio::test]
    async fn markets_should_not_treat_server_errors_as_not_found() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = Client::new(&server.base_url())?;

        let mock = server.mock(|when, then| {
            when.method(GET).path("/markets");
            then.status(StatusCode::BAD_GATEWAY).body("bad gateway");
        });

        let err = client
            .markets(&MarketsRequest::top_by_volume(1, 0))
            .await
            .unwrap_err();

        mock.assert();
        assert_eq!(err.kind(), Kind::Status);
        assert!(!err.is_not_found(), "{err}");
        assert!(err.to_string().contains("502"), "{err}");

        Ok(())
    }
}
