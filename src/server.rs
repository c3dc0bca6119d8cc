//! HTTP API over the session registry.
//!
//! Every route lives under `/api`. Game routes carry the game kind in the
//! path; a session id used under another kind's path is reported as not
//! found. Errors are returned as `{"error": message}` with 404 for unknown
//! sessions and 400 for everything else. Cross-origin requests are allowed
//! from the configured origins only.

use crate::games::tictactoe::Mark;
use crate::games::{Action, GameConfig, GameKind, GameState};
use crate::{ConfigError, GameError, GameErrorKind, SessionId, SessionRegistry};
use axum::body::{Body, Bytes};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, info, instrument, warn};

/// State shared by all handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    registry: SessionRegistry,
}

impl AppState {
    /// Wraps an existing registry.
    pub fn new(registry: SessionRegistry) -> Self {
        Self { registry }
    }

    /// The session registry.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }
}

/// Builds the `/api` router, accepting browser calls from `allowed_origins`.
///
/// # Errors
///
/// Returns [`ConfigError`] if an origin is not a valid header value.
#[instrument(skip(state))]
pub fn router(state: AppState, allowed_origins: &[String]) -> Result<Router, ConfigError> {
    info!("Building API router");
    let cors = cors_layer(allowed_origins)?;
    let router = Router::new()
        .route("/api/health", get(health))
        .route("/api/games/list", get(list_games))
        .route("/api/games/{kind}/new", post(create_game))
        .route("/api/games/{kind}/{id}", get(get_game))
        .route("/api/games/{kind}/{id}/move", post(make_move))
        .route("/api/games/{kind}/{id}/guess", post(guess))
        .route("/api/games/{kind}/{id}/play", post(play))
        .route("/api/games/{kind}/{id}/reset", post(reset_game))
        .route("/api/games/{kind}/{id}/undo", post(undo_move))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .layer(cors)
        .with_state(state);
    Ok(router)
}

/// CORS policy for the API: listed origins, GET/POST/OPTIONS, credentials.
///
/// # Errors
///
/// Returns [`ConfigError`] if an origin is not a valid header value.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::new(format!("Invalid allowed origin '{}': {}", origin, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(?origins, "CORS origins");

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            ACCEPT,
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .allow_credentials(true))
}

/// Error returned by a handler.
#[derive(Debug, derive_more::From)]
pub struct ApiError(GameError);

impl ApiError {
    /// HTTP status for the wrapped error.
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            GameErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
            GameErrorKind::InvalidMove(_)
            | GameErrorKind::InvalidAction(_)
            | GameErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        Self(GameError::validation(rejection.body_text()))
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self.0, "Request failed");
        let body = ErrorBody {
            error: self.0.kind().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Entry of the game listing.
#[derive(Debug, Serialize)]
struct GameListing {
    id: GameKind,
    name: &'static str,
}

/// Response to a successful create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Created {
    game_id: SessionId,
    state: GameState,
}

#[derive(Debug, Deserialize)]
struct MoveRequest {
    pos: usize,
    #[serde(default)]
    player: Option<Mark>,
}

#[derive(Debug, Deserialize)]
struct NumberRequest {
    n: serde_json::Number,
}

impl NumberRequest {
    /// The guess as an `i64`, saturating integers that do not fit.
    ///
    /// Saturated values lie outside every range, so the engine answers them
    /// with an out-of-range hint. Only fractional numbers are rejected.
    fn guess(&self) -> Result<i64, GameError> {
        if let Some(n) = self.n.as_i64() {
            return Ok(n);
        }
        if self.n.as_u64().is_some() {
            return Ok(i64::MAX);
        }
        match self.n.as_f64() {
            Some(f) if f.fract() == 0.0 => Ok(f as i64),
            _ => Err(GameError::validation(format!(
                "guess must be an integer, got {}",
                self.n
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LetterRequest {
    letter: String,
}

#[derive(Debug, Deserialize)]
struct PlayRequest {
    #[serde(rename = "move")]
    throw: String,
}

#[instrument(skip(state))]
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    debug!(sessions = state.registry.len(), "Health check");
    (StatusCode::OK, "ok")
}

#[instrument]
async fn list_games() -> Json<Vec<GameListing>> {
    Json(
        GameKind::iter()
            .map(|kind| GameListing {
                id: kind,
                name: kind.title(),
            })
            .collect(),
    )
}

#[instrument(skip(state, body))]
async fn create_game(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let kind = parse_kind(&kind)?;
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| GameError::validation(format!("invalid JSON body: {e}")))?
    };
    let config = GameConfig::from_json(kind, body)?;

    let (game_id, initial) = state.registry.create(config);
    let created = Created {
        game_id,
        state: initial,
    };
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<Json<GameState>> {
    session_of_kind(&state, &kind, &id)?;
    Ok(Json(state.registry.get(&id)?))
}

#[instrument(skip(state, body))]
async fn make_move(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> ApiResult<Json<GameState>> {
    let kind = session_of_kind(&state, &kind, &id)?;
    require(kind, GameKind::TicTacToe, "move")?;
    let Json(MoveRequest { pos, player }) = body?;
    apply(&state, &id, Action::TicTacToeMove { pos, player })
}

#[instrument(skip(state, body))]
async fn guess(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult<Json<GameState>> {
    let kind = session_of_kind(&state, &kind, &id)?;
    let Json(body) = body?;
    let action = match kind {
        GameKind::NumberGuess => {
            let request: NumberRequest = decode(body)?;
            Action::NumberGuess {
                n: request.guess()?,
            }
        }
        GameKind::Hangman => {
            let LetterRequest { letter } = decode(body)?;
            Action::HangmanGuess { letter }
        }
        other => {
            let message = format!("{other} has no guess action");
            return Err(GameError::invalid_action(message).into());
        }
    };
    apply(&state, &id, action)
}

#[instrument(skip(state, body))]
async fn play(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    body: Result<Json<PlayRequest>, JsonRejection>,
) -> ApiResult<Json<GameState>> {
    let kind = session_of_kind(&state, &kind, &id)?;
    require(kind, GameKind::Rps, "play")?;
    let Json(PlayRequest { throw }) = body?;
    apply(&state, &id, Action::RpsPlay { throw })
}

#[instrument(skip(state))]
async fn reset_game(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<Json<GameState>> {
    session_of_kind(&state, &kind, &id)?;
    Ok(Json(state.registry.reset(&id)?))
}

#[instrument(skip(state))]
async fn undo_move(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<Json<GameState>> {
    let kind = session_of_kind(&state, &kind, &id)?;
    require(kind, GameKind::TicTacToe, "undo")?;
    apply(&state, &id, Action::TicTacToeUndo)
}

fn apply(state: &AppState, id: &str, action: Action) -> ApiResult<Json<GameState>> {
    Ok(Json(state.registry.mutate(id, action)?))
}

/// Parses a path segment naming a game kind. Unknown kinds are not found.
fn parse_kind(kind: &str) -> Result<GameKind, GameError> {
    kind.parse()
        .map_err(|_| GameError::not_found(format!("game kind '{kind}'")))
}

/// Resolves the session's kind and checks it against the path.
fn session_of_kind(state: &AppState, kind: &str, id: &str) -> Result<GameKind, GameError> {
    let expected = parse_kind(kind)?;
    let actual = state.registry.kind(id)?;
    if actual != expected {
        debug!(%expected, %actual, "Session belongs to another game");
        return Err(GameError::not_found(id));
    }
    Ok(actual)
}

fn require(kind: GameKind, wanted: GameKind, verb: &str) -> Result<(), GameError> {
    if kind == wanted {
        Ok(())
    } else {
        Err(GameError::invalid_action(format!("{kind} has no {verb} action")))
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<T, GameError> {
    serde_json::from_value(body).map_err(|e| GameError::validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(GameError::not_found("x")).status(),
            StatusCode::NOT_FOUND
        );
        for err in [
            GameError::invalid_move("taken"),
            GameError::invalid_action("wrong kind"),
            GameError::validation("bad json"),
        ] {
            assert_eq!(ApiError::from(err).status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_guess_number_saturates_large_integers() {
        let request = |n: serde_json::Value| -> NumberRequest {
            serde_json::from_value(serde_json::json!({ "n": n })).unwrap()
        };
        assert_eq!(request(serde_json::json!(42)).guess().unwrap(), 42);
        assert_eq!(request(serde_json::json!(-7)).guess().unwrap(), -7);
        assert_eq!(request(serde_json::json!(u64::MAX)).guess().unwrap(), i64::MAX);
        assert_eq!(request(serde_json::json!(1e30)).guess().unwrap(), i64::MAX);
        assert_eq!(request(serde_json::json!(-1e30)).guess().unwrap(), i64::MIN);
        assert!(request(serde_json::json!(4.5)).guess().is_err());
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let origins = vec!["http://bad\norigin".to_string()];
        let err = cors_layer(&origins).unwrap_err();
        assert!(err.message.contains("Invalid allowed origin"));
    }

    #[test]
    fn test_unknown_kind_is_not_found() {
        assert!(parse_kind("chess").unwrap_err().is_not_found());
        assert_eq!(parse_kind("rps").unwrap(), GameKind::Rps);
    }
}
