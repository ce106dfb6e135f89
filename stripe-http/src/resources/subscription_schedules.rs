//! `v1/subscription_schedules`.

use futures_util::Stream;
use stripe_types::list::List;
use stripe_types::subscription_schedule::{
    SubscriptionSchedule, SubscriptionScheduleCancelParams, SubscriptionScheduleCreateParams,
    SubscriptionScheduleListParams, SubscriptionScheduleReleaseParams,
    SubscriptionScheduleRetrieveParams, SubscriptionScheduleUpdateParams,
};
use stripe_types::validate::check_id;

use crate::client::Client;
use crate::error::Error;
use crate::options::RequestOptions;
use crate::pagination::paginate;

/// Handle to the `SubscriptionSchedule` resource.
#[derive(Debug, Clone, Copy)]
pub struct SubscriptionSchedules<'a> {
    client: &'a Client,
}

impl<'a> SubscriptionSchedules<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Creates a schedule, either from explicit phases or from an existing
    /// subscription.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] when `from_subscription` is
    /// combined with other fields or a phase is malformed, or any transport
    /// or API error.
    pub async fn create(
        &self,
        params: &SubscriptionScheduleCreateParams,
        options: &RequestOptions,
    ) -> Result<SubscriptionSchedule, Error> {
        self.client
            .post(
                &["v1", "subscription_schedules"],
                "POST v1/subscription_schedules",
                params,
                options,
            )
            .await
    }

    /// Retrieves a schedule by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for an empty id, or any
    /// transport or API error.
    pub async fn retrieve(
        &self,
        id: &str,
        params: &SubscriptionScheduleRetrieveParams,
        options: &RequestOptions,
    ) -> Result<SubscriptionSchedule, Error> {
        check_id(id)?;
        self.client
            .get(
                &["v1", "subscription_schedules", id],
                "GET v1/subscription_schedules/{id}",
                params,
                options,
            )
            .await
    }

    /// Updates a schedule. When `phases` is set it replaces the whole phase
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for an empty id or a malformed
    /// phase, or any transport or API error.
    pub async fn update(
        &self,
        id: &str,
        params: &SubscriptionScheduleUpdateParams,
        options: &RequestOptions,
    ) -> Result<SubscriptionSchedule, Error> {
        check_id(id)?;
        self.client
            .post(
                &["v1", "subscription_schedules", id],
                "POST v1/subscription_schedules/{id}",
                params,
                options,
            )
            .await
    }

    /// Returns one page of schedules, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for a `limit` outside `[1, 100]`,
    /// or any transport or API error.
    pub async fn list(
        &self,
        params: &SubscriptionScheduleListParams,
        options: &RequestOptions,
    ) -> Result<List<SubscriptionSchedule>, Error> {
        self.client
            .get(
                &["v1", "subscription_schedules"],
                "GET v1/subscription_schedules",
                params,
                options,
            )
            .await
    }

    /// Streams every schedule matching `params`.
    pub fn list_auto(
        self,
        params: SubscriptionScheduleListParams,
        options: RequestOptions,
    ) -> impl Stream<Item = Result<SubscriptionSchedule, Error>> + 'a {
        paginate(params, move |page: SubscriptionScheduleListParams| {
            let options = options.clone();
            async move { self.list(&page, &options).await }
        })
    }

    /// Cancels a schedule and its subscription. Only `not_started` and
    /// `active` schedules can be canceled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for an empty id, or any
    /// transport or API error.
    pub async fn cancel(
        &self,
        id: &str,
        params: &SubscriptionScheduleCancelParams,
        options: &RequestOptions,
    ) -> Result<SubscriptionSchedule, Error> {
        check_id(id)?;
        self.client
            .post(
                &["v1", "subscription_schedules", id, "cancel"],
                "POST v1/subscription_schedules/{id}/cancel",
                params,
                options,
            )
            .await
    }

    /// Releases a schedule, leaving its subscription in place without
    /// further scheduled changes. Only `not_started` and `active` schedules
    /// can be released.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for an empty id, or any
    /// transport or API error.
    pub async fn release(
        &self,
        id: &str,
        params: &SubscriptionScheduleReleaseParams,
        options: &RequestOptions,
    ) -> Result<SubscriptionSchedule, Error> {
        check_id(id)?;
        self.client
            .post(
                &["v1", "subscription_schedules", id, "release"],
                "POST v1/subscription_schedules/{id}/release",
                params,
                options,
            )
            .await
    }
}
