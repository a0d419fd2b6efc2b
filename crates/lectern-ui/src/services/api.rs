//! HTTP client for the single JSON endpoint.
//!
//! # Design
//! - Every operation posts an [`ApiRequest`] envelope to the same URL.
//! - Non-2xx responses become [`ApiError::Status`] with the server message
//!   when one is provided.
//! - Requests are logged with the token redacted.

use crate::core::config::ClientConfig;
use crate::core::content::ContentBlock;
use crate::core::error::ApiError;
use crate::core::session::UserInfo;
use gloo::console;
use gloo_net::http::Request;
use lectern_api_models::{
    AnnouncementRow, ApiRequest, ApiResponse, CourseInfo, EmptyPayload, InstructorInfoRow,
    InstructorRow, LoginArgs, MilestoneData, PageRow, QueryArgs, SidebarRow,
    TokenPayload, UpdateArgs, UserInfoRow, group_sidebar_rows,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Client bound to one endpoint.
#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    endpoint: String,
}

impl ApiClient {
    pub(crate) fn new(config: &ClientConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
        }
    }

    async fn post<A: Serialize, T: DeserializeOwned>(
        &self,
        label: &str,
        request: &ApiRequest<A>,
    ) -> Result<ApiResponse<T>, ApiError> {
        console::debug!(
            "api request",
            label,
            serde_json::to_string(&request.redacted()).unwrap_or_default()
        );
        let response = Request::post(&self.endpoint)
            .json(request)
            .map_err(|err| ApiError::Transport(err.to_string()))?
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        if !response.ok() {
            let err = ApiError::from_status_body(status, &body);
            console::debug!("api error", label, status, err.to_string());
            return Err(err);
        }
        console::debug!("api response", label, String::from_utf8_lossy(&body).into_owned());
        Ok(serde_json::from_slice(&body)?)
    }

    async fn query<T: DeserializeOwned>(&self, token: &str, args: QueryArgs) -> Result<T, ApiError> {
        let label = args.name();
        let request = ApiRequest::query(token, args);
        Ok(self.post::<_, T>(label, &request).await?.payload)
    }

    pub(crate) async fn update(&self, token: &str, args: UpdateArgs) -> Result<(), ApiError> {
        let label = args.name();
        let request = ApiRequest::update(token, args);
        self.post::<_, EmptyPayload>(label, &request).await?;
        Ok(())
    }

    pub(crate) async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let request = ApiRequest::login(LoginArgs {
            user_id: username.to_string(),
            password: password.to_string(),
        });
        let response: ApiResponse<TokenPayload> = self.post("login", &request).await?;
        Ok(response.payload.token)
    }

    pub(crate) async fn user_info(&self, token: &str) -> Result<UserInfo, ApiError> {
        let row: Option<UserInfoRow> = self.query(token, QueryArgs::GetSessionUid).await?;
        row.map(UserInfo::from).ok_or_else(|| {
            ApiError::Payload("Expected a user record for the session, but got none.".to_string())
        })
    }

    pub(crate) async fn dashboard(&self, token: &str, args: QueryArgs) -> Result<Vec<CourseInfo>, ApiError> {
        self.query(token, args).await
    }

    pub(crate) async fn course_info(
        &self,
        token: &str,
        course_id: i64,
        user_id: i64,
    ) -> Result<CourseInfo, ApiError> {
        self.query(token, QueryArgs::CourseInfo { course_id, user_id })
            .await
    }

    pub(crate) async fn structure_data(
        &self,
        token: &str,
        course_id: i64,
    ) -> Result<Vec<MilestoneData>, ApiError> {
        let rows: Vec<SidebarRow> = self.query(token, QueryArgs::Sidebar { course_id }).await?;
        Ok(group_sidebar_rows(rows))
    }

    /// Content blocks for a published or draft page source.
    pub(crate) async fn content(&self, token: &str, args: QueryArgs) -> Result<Vec<ContentBlock>, ApiError> {
        Ok(match args {
            QueryArgs::CourseAnnouncements { .. } => {
                let rows: Vec<AnnouncementRow> = self.query(token, args).await?;
                rows.into_iter().map(ContentBlock::from).collect()
            }
            QueryArgs::GetCourseInstructors { .. } => {
                let rows: Vec<InstructorRow> = self.query(token, args).await?;
                rows.into_iter().map(ContentBlock::from).collect()
            }
            QueryArgs::GetPage { .. } => {
                let rows: Vec<PageRow> = self.query(token, args).await?;
                rows.into_iter().map(ContentBlock::from).collect()
            }
            other => {
                return Err(ApiError::Payload(format!(
                    "{} does not return page content",
                    other.name()
                )));
            }
        })
    }

    pub(crate) async fn active_instructors(
        &self,
        token: &str,
        course_id: i64,
    ) -> Result<Vec<UserInfo>, ApiError> {
        let rows: Vec<InstructorInfoRow> = self
            .query(token, QueryArgs::GetActiveCourseInstructors { course_id })
            .await?;
        Ok(rows.into_iter().map(UserInfo::from).collect())
    }
}
