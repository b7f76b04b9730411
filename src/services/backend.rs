//! Remote rifa backend client.
//!
//! Thin HTTP wrapper over the `msrifaadmin` API. The backend is the system
//! of record — credentials, raffles, saved layouts, print generation — and
//! this service only holds live builder sessions in front of it. Pure
//! envelope parsing is split out of the request methods for testability.
//!
//! Auth tokens ride as a query parameter on every call, and the tenant
//! headers (`empresaId`/`empresaNome`) go on every request.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use layout::canvas::Orientation;
use layout::wire::{PrintPosition, SavedLayout};

use crate::envelope::ApiResult;

pub const DEFAULT_BASE_URL: &str = "https://multisorteios.dev/msrifaadmin/api";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// CONFIG
// =============================================================================

/// Backend connection settings loaded from environment.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// API root, no trailing slash.
    pub base_url: String,
    /// Tenant id header value, if the deployment is multi-tenant.
    pub empresa_id: Option<String>,
    /// Tenant display-name header value.
    pub empresa_nome: Option<String>,
}

impl BackendConfig {
    /// Load from `BACKEND_BASE_URL`, `EMPRESA_ID`, `EMPRESA_NOME`. All
    /// optional; the public API root is the default.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("BACKEND_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        Self {
            base_url,
            empresa_id: std::env::var("EMPRESA_ID").ok(),
            empresa_nome: std::env::var("EMPRESA_NOME").ok(),
        }
    }
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),
    #[error("backend request failed: {0}")]
    Request(String),
    #[error("backend returned http {status}: {body}")]
    Response { status: u16, body: String },
    #[error("backend response parse failed: {0}")]
    Parse(String),
    #[error("backend rejected the request: {0}")]
    Rejected(String),
}

/// Authenticated user data returned by `/login` and `/validartoken`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthData {
    pub login: String,
    pub name: String,
    pub token: String,
    pub profile: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Whether the user has replaced the initial password.
    #[serde(rename = "senhaAlterada", default)]
    pub senha_alterada: bool,
}

/// An open raffle, as listed for printing and sales.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sorteio {
    pub id: i64,
    pub titulo: String,
    #[serde(rename = "dataSorteio")]
    pub data_sorteio: String,
    #[serde(rename = "situacaoId")]
    pub situacao_id: i64,
    pub situacao: String,
    #[serde(rename = "valorBilhete")]
    pub valor_bilhete: f64,
    pub tipo: String,
    pub modalidade: String,
    pub horario: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Build a client with the usual request/connect timeouts.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// `POST /login` — exchange credentials for a token and profile.
    pub async fn login(&self, login: &str, password: &str) -> Result<AuthData, BackendError> {
        let response = self
            .post("login")
            .json(&serde_json::json!({ "login": login, "password": password }))
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let body = read_body(response).await?;
        require_data(parse_envelope(&body)?)
    }

    /// `GET /validartoken` — probe a token, returning the user it belongs to.
    pub async fn validar_token(&self, token: &str) -> Result<AuthData, BackendError> {
        let response = self
            .get("validartoken")
            .query(&[("token", token)])
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let body = read_body(response).await?;
        require_data(parse_envelope(&body)?)
    }

    /// `GET /listarsorteiosvendasabertas` — raffles currently open for sales.
    pub async fn listar_sorteios(&self, token: &str) -> Result<Vec<Sorteio>, BackendError> {
        let response = self
            .get("listarsorteiosvendasabertas")
            .query(&[("token", token)])
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let body = read_body(response).await?;
        Ok(parse_envelope(&body)?.unwrap_or_default())
    }

    /// `GET /buscarlayoutimpressao` — saved layout for an orientation and
    /// pair count, or `None` if nothing was ever saved for that key.
    pub async fn buscar_layout(
        &self,
        token: &str,
        orientation: Orientation,
        quantidade: u8,
    ) -> Result<Option<SavedLayout>, BackendError> {
        let quantidade = quantidade.to_string();
        let response = self
            .get("buscarlayoutimpressao")
            .query(&[
                ("token", token),
                ("orientacao", orientation.as_str()),
                ("quantidade", quantidade.as_str()),
            ])
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let body = read_body(response).await?;
        parse_envelope(&body)
    }

    /// `POST /gerarimpressao` — submit the positions payload for a raffle's
    /// print run.
    pub async fn gerar_impressao(
        &self,
        token: &str,
        bolao_id: i64,
        positions: &[PrintPosition],
    ) -> Result<(), BackendError> {
        let bolao_id = bolao_id.to_string();
        let response = self
            .post("gerarimpressao")
            .query(&[("token", token), ("bolaoId", bolao_id.as_str())])
            .json(positions)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let body = read_body(response).await?;
        parse_envelope::<serde_json::Value>(&body)?;
        Ok(())
    }

    /// `POST /gerarimpressaoteste` — test print. Returns raw PDF bytes on
    /// success; a JSON error envelope otherwise.
    pub async fn gerar_impressao_teste(
        &self,
        token: &str,
        bolao_id: i64,
        positions: &[PrintPosition],
    ) -> Result<Vec<u8>, BackendError> {
        let bolao_id = bolao_id.to_string();
        let response = self
            .post("gerarimpressaoteste")
            .query(&[("token", token), ("bolaoId", bolao_id.as_str())])
            .json(positions)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let is_pdf = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/pdf"));

        if status == 200 && is_pdf {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| BackendError::Request(e.to_string()))?;
            return Ok(bytes.to_vec());
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        if status != 200 {
            return Err(BackendError::Response { status, body });
        }
        // 200 without a PDF body: the error envelope path.
        parse_envelope::<serde_json::Value>(&body)?;
        Err(BackendError::Parse("expected a PDF body or an error envelope".to_owned()))
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.get(self.url(path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.post(self.url(path)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url)
    }

    fn decorate(&self, mut builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(id) = &self.config.empresa_id {
            builder = builder.header("empresaId", id);
        }
        if let Some(nome) = &self.config.empresa_nome {
            builder = builder.header("empresaNome", nome);
        }
        builder
    }
}

// =============================================================================
// PARSING
// =============================================================================

async fn read_body(response: reqwest::Response) -> Result<String, BackendError> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| BackendError::Request(e.to_string()))?;
    if status != 200 {
        return Err(BackendError::Response { status, body });
    }
    Ok(body)
}

/// Parse an `ApiResult<T>` body into its payload. `success: false` maps to
/// `Rejected`, malformed JSON to `Parse`.
fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<Option<T>, BackendError> {
    let envelope: ApiResult<T> =
        serde_json::from_str(body).map_err(|e| BackendError::Parse(e.to_string()))?;
    envelope.into_data().map_err(BackendError::Rejected)
}

/// Like [`parse_envelope`], but for endpoints whose success always carries data.
fn require_data<T>(data: Option<T>) -> Result<T, BackendError> {
    data.ok_or_else(|| BackendError::Parse("backend omitted response data".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> BackendConfig {
        BackendConfig {
            base_url: "http://localhost:9/msrifaadmin/api".to_owned(),
            empresa_id: Some("1".to_owned()),
            empresa_nome: Some("Test".to_owned()),
        }
    }

    #[test]
    fn url_joins_base_and_path() {
        let client = BackendClient::new(test_config()).unwrap();
        assert_eq!(client.url("login"), "http://localhost:9/msrifaadmin/api/login");
    }

    #[test]
    fn parse_envelope_success_with_data() {
        let data: Option<i32> = parse_envelope(r#"{"success":true,"data":7}"#).unwrap();
        assert_eq!(data, Some(7));
    }

    #[test]
    fn parse_envelope_success_without_data() {
        let data: Option<i32> = parse_envelope(r#"{"success":true}"#).unwrap();
        assert_eq!(data, None);
    }

    #[test]
    fn parse_envelope_rejection_carries_message() {
        let err = parse_envelope::<i32>(r#"{"success":false,"errorMessage":"token expirado"}"#).unwrap_err();
        assert!(matches!(err, BackendError::Rejected(msg) if msg == "token expirado"));
    }

    #[test]
    fn parse_envelope_malformed_is_parse_error() {
        let err = parse_envelope::<i32>("<html>gateway timeout</html>").unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));
    }

    #[test]
    fn require_data_rejects_empty_success() {
        let err = require_data::<i32>(None).unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));
    }

    #[test]
    fn auth_data_deserializes_backend_fields() {
        let user: AuthData = serde_json::from_str(
            r#"{"login":"maria","name":"Maria","token":"abc","profile":"ADMIN","userId":12,"senhaAlterada":true}"#,
        )
        .unwrap();
        assert_eq!(user.login, "maria");
        assert_eq!(user.user_id, 12);
        assert!(user.senha_alterada);
    }

    #[test]
    fn auth_data_senha_alterada_defaults_false() {
        let user: AuthData = serde_json::from_str(
            r#"{"login":"jo","name":"Jo","token":"t","profile":"CAMBISTA","userId":3}"#,
        )
        .unwrap();
        assert!(!user.senha_alterada);
    }

    #[test]
    fn sorteio_deserializes_backend_fields() {
        let sorteio: Sorteio = serde_json::from_str(
            r#"{
                "id": 44,
                "titulo": "Rifa de Natal",
                "dataSorteio": "2025-12-24",
                "situacaoId": 1,
                "situacao": "ABERTO",
                "valorBilhete": 10.0,
                "tipo": "RIFA",
                "modalidade": "FEDERAL",
                "horario": "19:00"
            }"#,
        )
        .unwrap();
        assert_eq!(sorteio.id, 44);
        assert_eq!(sorteio.situacao, "ABERTO");
        assert_eq!(sorteio.image_url, None);
    }

    #[test]
    fn saved_layout_parses_through_backend_types() {
        let layout: SavedLayout = serde_json::from_str(
            r#"{"orientacao":"PAISAGEM","quantidade":1,"xCanhoto1":1,"yCanhoto1":2,"xBilhete1":3,"yBilhete1":4}"#,
        )
        .unwrap();
        assert_eq!(layout.orientacao, Orientation::Landscape);
        assert_eq!(layout.quantidade, 1);
    }
}
