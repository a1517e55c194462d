//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::State, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::HelperError;
use crate::kvp::KvpRecord;
use crate::logic::*;
use crate::number::two_digits;
use crate::protocol::*;
use crate::state::AppState;
use crate::util::{nl2br, selectors, unique_values};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorOut>)>;

fn api_error(e: HelperError) -> (StatusCode, Json<ErrorOut>) {
  let status = match e {
    HelperError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
    HelperError::NotFound { .. } => StatusCode::NOT_FOUND,
  };
  (status, Json(ErrorOut { error: e.to_string(), kind: e.kind().into() }))
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_fragment(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(FragmentIo { fragment: state.fragment().await })
}

#[instrument(level = "info", skip(state, body), fields(fragment_len = body.fragment.len()))]
pub async fn http_put_fragment(
  State(state): State<Arc<AppState>>,
  Json(body): Json<FragmentIo>,
) -> impl IntoResponse {
  let fragment = state.navigate(&body.fragment).await;
  info!(target: "helper_kit::fragment", %fragment, "HTTP navigation");
  Json(FragmentIo { fragment })
}

#[instrument(level = "info", skip(state, body), fields(ambient = body.source.is_none()))]
pub async fn http_post_kvp_parse(
  State(state): State<Arc<AppState>>,
  Json(body): Json<KvpSourceIn>,
) -> Json<KvpRecord> {
  Json(kvp_parse(&state, body.source.as_deref()).await)
}

#[instrument(level = "info", skip(state, body), fields(key = %body.key, ambient = body.source.is_none()))]
pub async fn http_post_kvp_get(
  State(state): State<Arc<AppState>>,
  Json(body): Json<KvpKeyIn>,
) -> ApiResult<ValueOut> {
  let value = kvp_get(&state, &body.key, body.source.as_deref()).await.map_err(api_error)?;
  Ok(Json(ValueOut { key: body.key, value }))
}

#[instrument(level = "info", skip(state, body), fields(updates = body.updates.pairs.len(), ambient = body.source.is_none()))]
pub async fn http_post_kvp_set(
  State(state): State<Arc<AppState>>,
  Json(body): Json<KvpSetIn>,
) -> Json<KvpOut> {
  let out = kvp_set(&state, body.updates, body.source.as_deref()).await;
  info!(target: "helper_kit::kvp", written = out.written, "HTTP kvp set");
  Json(out)
}

#[instrument(level = "info", skip(state, body), fields(key = %body.key, ambient = body.source.is_none()))]
pub async fn http_post_kvp_remove(
  State(state): State<Arc<AppState>>,
  Json(body): Json<KvpKeyIn>,
) -> ApiResult<KvpOut> {
  let out = kvp_remove(&state, &body.key, body.source.as_deref()).await.map_err(api_error)?;
  info!(target: "helper_kit::kvp", key = %body.key, written = out.written, "HTTP kvp remove");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, body), fields(template_len = body.template.len()))]
pub async fn http_post_format(
  State(state): State<Arc<AppState>>,
  Json(body): Json<FormatIn>,
) -> ApiResult<TextOut> {
  let text = format_text(&state, &body.template, &body.markers).map_err(api_error)?;
  Ok(Json(TextOut { text }))
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len(), max_chars = body.max_chars))]
pub async fn http_post_truncate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<TruncateIn>,
) -> ApiResult<TextOut> {
  let text = truncate_text(&state, &body.text, body.max_chars, body.replace_with.as_deref()).map_err(api_error)?;
  Ok(Json(TextOut { text }))
}

#[instrument(level = "info", skip(body))]
pub async fn http_post_commas(Json(body): Json<CommasIn>) -> Json<TextOut> {
  Json(TextOut { text: commas(&body.num) })
}

#[instrument(level = "info", skip(body), fields(n = body.n))]
pub async fn http_post_two_digits(Json(body): Json<TwoDigitsIn>) -> Json<TextOut> {
  Json(TextOut { text: two_digits(body.n) })
}

#[instrument(level = "info", skip(body), fields(items = body.items.len()))]
pub async fn http_post_unique(Json(body): Json<UniqueIn>) -> Json<ItemsOut> {
  Json(ItemsOut { items: unique_values(&body.items) })
}

#[instrument(level = "info", skip(body), fields(text_len = body.text.len()))]
pub async fn http_post_nl2br(Json(body): Json<Nl2brIn>) -> Json<TextOut> {
  Json(TextOut { text: nl2br(&body.text) })
}

#[instrument(level = "info", skip(body), fields(count = body.selectors.len()))]
pub async fn http_post_selectors(Json(body): Json<SelectorsIn>) -> Json<TextOut> {
  Json(TextOut { text: selectors(&body.selectors) })
}

#[instrument(level = "info", skip(state, body), fields(url = %body.url))]
pub async fn http_post_popup(
  State(state): State<Arc<AppState>>,
  Json(body): Json<PopupIn>,
) -> ApiResult<crate::popup::PopupSpec> {
  let spec = popup(&state, &body.url, body.options.as_ref()).map_err(api_error)?;
  Ok(Json(spec))
}
