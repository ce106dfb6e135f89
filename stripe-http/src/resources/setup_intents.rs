//! `v1/setup_intents`.

use futures_util::Stream;
use stripe_types::list::List;
use stripe_types::setup_intent::{
    SetupIntent, SetupIntentCancelParams, SetupIntentConfirmParams, SetupIntentCreateParams,
    SetupIntentListParams, SetupIntentRetrieveParams, SetupIntentUpdateParams,
};
use stripe_types::validate::check_id;

use crate::client::Client;
use crate::error::Error;
use crate::options::RequestOptions;
use crate::pagination::paginate;

/// Handle to the `SetupIntent` resource.
#[derive(Debug, Clone, Copy)]
pub struct SetupIntents<'a> {
    client: &'a Client,
}

impl<'a> SetupIntents<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Creates a `SetupIntent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for locally invalid parameters,
    /// or any transport or API error.
    pub async fn create(
        &self,
        params: &SetupIntentCreateParams,
        options: &RequestOptions,
    ) -> Result<SetupIntent, Error> {
        self.client
            .post(&["v1", "setup_intents"], "POST v1/setup_intents", params, options)
            .await
    }

    /// Retrieves a `SetupIntent` by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for an empty id, or any
    /// transport or API error.
    pub async fn retrieve(
        &self,
        id: &str,
        params: &SetupIntentRetrieveParams,
        options: &RequestOptions,
    ) -> Result<SetupIntent, Error> {
        check_id(id)?;
        self.client
            .get(
                &["v1", "setup_intents", id],
                "GET v1/setup_intents/{id}",
                params,
                options,
            )
            .await
    }

    /// Updates a `SetupIntent`. Omitted fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for an empty id, or any
    /// transport or API error.
    pub async fn update(
        &self,
        id: &str,
        params: &SetupIntentUpdateParams,
        options: &RequestOptions,
    ) -> Result<SetupIntent, Error> {
        check_id(id)?;
        self.client
            .post(
                &["v1", "setup_intents", id],
                "POST v1/setup_intents/{id}",
                params,
                options,
            )
            .await
    }

    /// Returns one page of `SetupIntent`s, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for a `limit` outside `[1, 100]`,
    /// or any transport or API error.
    pub async fn list(
        &self,
        params: &SetupIntentListParams,
        options: &RequestOptions,
    ) -> Result<List<SetupIntent>, Error> {
        self.client
            .get(&["v1", "setup_intents"], "GET v1/setup_intents", params, options)
            .await
    }

    /// Streams every `SetupIntent` matching `params`, fetching pages as
    /// needed.
    pub fn list_auto(
        self,
        params: SetupIntentListParams,
        options: RequestOptions,
    ) -> impl Stream<Item = Result<SetupIntent, Error>> + 'a {
        paginate(params, move |page: SetupIntentListParams| {
            let options = options.clone();
            async move { self.list(&page, &options).await }
        })
    }

    /// Cancels a `SetupIntent`.
    ///
    /// Permitted while the status is `requires_payment_method`,
    /// `requires_confirmation` or `requires_action`; otherwise the API
    /// answers with an error classified as
    /// [`ErrorCondition::InvalidState`](crate::ErrorCondition::InvalidState).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for an empty id, or any
    /// transport or API error.
    pub async fn cancel(
        &self,
        id: &str,
        params: &SetupIntentCancelParams,
        options: &RequestOptions,
    ) -> Result<SetupIntent, Error> {
        check_id(id)?;
        self.client
            .post(
                &["v1", "setup_intents", id, "cancel"],
                "POST v1/setup_intents/{id}/cancel",
                params,
                options,
            )
            .await
    }

    /// Confirms a `SetupIntent`.
    ///
    /// The returned status is `succeeded`, `requires_action` (see
    /// `next_action`) or `requires_payment_method` after a failed attempt
    /// (see `last_setup_error`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for an empty id or invalid
    /// mandate data, or any transport or API error.
    pub async fn confirm(
        &self,
        id: &str,
        params: &SetupIntentConfirmParams,
        options: &RequestOptions,
    ) -> Result<SetupIntent, Error> {
        check_id(id)?;
        self.client
            .post(
                &["v1", "setup_intents", id, "confirm"],
                "POST v1/setup_intents/{id}/confirm",
                params,
                options,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCondition;
    use crate::test_support::test_client;
    use futures_util::TryStreamExt;
    use serde_json::json;
    use stripe_types::setup_intent::SetupIntentStatus;
    use stripe_types::setup_intent::params::ConfirmMandateData;
    use wiremock::matchers::{any, body_string, body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn intent_json(id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "object": "setup_intent",
            "client_secret": format!("{id}_secret_abc"),
            "created": 1_573_000_000,
            "customer": "cus_1",
            "livemode": false,
            "metadata": {},
            "payment_method_types": ["card"],
            "status": status,
            "usage": "off_session"
        })
    }

    #[tokio::test]
    async fn test_create() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/setup_intents"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("customer=cus_1"))
            .and(body_string_contains("payment_method_types%5B0%5D=card"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(intent_json("seti_1", "requires_payment_method")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let params = SetupIntentCreateParams::new()
            .with_customer("cus_1")
            .with_payment_method_types(["card"]);
        let intent = client
            .setup_intents()
            .create(&params, &RequestOptions::new())
            .await
            .unwrap();
        assert!(intent.id.starts_with("seti_"));
        assert_eq!(intent.status, SetupIntentStatus::RequiresPaymentMethod);
        assert!(intent.client_secret.is_some());
    }

    #[tokio::test]
    async fn test_confirm_requires_action() {
        let server = MockServer::start().await;
        let mut body = intent_json("seti_1", "requires_action");
        body["next_action"] = json!({
            "type": "redirect_to_url",
            "redirect_to_url": { "return_url": "https://example.com/return", "url": "https://hooks.stripe.com/3ds" }
        });
        Mock::given(method("POST"))
            .and(path("/v1/setup_intents/seti_1/confirm"))
            .and(body_string_contains("payment_method=pm_card_threeDSecure2Required"))
            .and(body_string_contains(
                "mandate_data%5Bcustomer_acceptance%5D%5Btype%5D=online",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let params = SetupIntentConfirmParams {
            payment_method: Some("pm_card_threeDSecure2Required".to_owned()),
            mandate_data: Some(ConfirmMandateData::inferred_online()),
            return_url: Some("https://example.com/return".to_owned()),
            ..SetupIntentConfirmParams::default()
        };
        let intent = client
            .setup_intents()
            .confirm("seti_1", &params, &RequestOptions::new())
            .await
            .unwrap();
        assert_eq!(intent.status, SetupIntentStatus::RequiresAction);
        assert!(intent.next_action.is_some());
    }

    #[tokio::test]
    async fn test_cancel_succeeded_intent_is_invalid_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/setup_intents/seti_1/cancel"))
            .and(body_string("cancellation_reason=abandoned"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "type": "invalid_request_error",
                    "code": "setup_intent_unexpected_state",
                    "message": "You cannot cancel this SetupIntent because it has a status of succeeded."
                }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let params = SetupIntentCancelParams {
            cancellation_reason: Some(stripe_types::setup_intent::CancellationReason::Abandoned),
            ..SetupIntentCancelParams::default()
        };
        let err = client
            .setup_intents()
            .cancel("seti_1", &params, &RequestOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err.condition(), ErrorCondition::InvalidState);
    }

    #[tokio::test]
    async fn test_retrieve_matches_created() {
        let server = MockServer::start().await;
        let body = intent_json("seti_7", "requires_payment_method");
        Mock::given(method("POST"))
            .and(path("/v1/setup_intents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/setup_intents/seti_7"))
            .and(query_param("client_secret", "seti_7_secret_abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let handle = client.setup_intents();
        let created = handle
            .create(
                &SetupIntentCreateParams::new().with_customer("cus_1"),
                &RequestOptions::new(),
            )
            .await
            .unwrap();
        let params = SetupIntentRetrieveParams {
            client_secret: created.client_secret.clone(),
            ..SetupIntentRetrieveParams::default()
        };
        let fetched = handle
            .retrieve(&created.id, &params, &RequestOptions::new())
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_sends_only_set_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/setup_intents/seti_1"))
            .and(body_string("description=Saved+card"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(intent_json("seti_1", "requires_payment_method")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let params = SetupIntentUpdateParams {
            description: Some("Saved card".to_owned()),
            ..SetupIntentUpdateParams::default()
        };
        client
            .setup_intents()
            .update("seti_1", &params, &RequestOptions::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalid_limit_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let params = SetupIntentListParams {
            limit: Some(0),
            ..SetupIntentListParams::default()
        };
        let err = client
            .setup_intents()
            .list(&params, &RequestOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err.condition(), ErrorCondition::InvalidParameters);

        let err = client
            .setup_intents()
            .retrieve("", &SetupIntentRetrieveParams::default(), &RequestOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }

    #[tokio::test]
    async fn test_list_auto_follows_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/setup_intents"))
            .and(query_param("starting_after", "seti_2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "data": [intent_json("seti_1", "succeeded")],
                "has_more": false,
                "url": "/v1/setup_intents"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/setup_intents"))
            .and(query_param("limit", "2"))
            .and(query_param("customer", "cus_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "data": [intent_json("seti_3", "succeeded"), intent_json("seti_2", "canceled")],
                "has_more": true,
                "url": "/v1/setup_intents"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let params = SetupIntentListParams {
            customer: Some("cus_1".to_owned()),
            limit: Some(2),
            ..SetupIntentListParams::default()
        };
        let intents: Vec<SetupIntent> = client
            .setup_intents()
            .list_auto(params, RequestOptions::new())
            .try_collect()
            .await
            .unwrap();
        let ids: Vec<&str> = intents.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["seti_3", "seti_2", "seti_1"]);
    }
}
