//! Game-data proxy handlers. Upstream JSON is returned verbatim, outside the
//! response envelope.

use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::ApiError;
use crate::domain::gw2::catalog::Collection;
use crate::domain::gw2::errors::Gw2Error;
use crate::domain::gw2::models::ApiKey;
use crate::domain::gw2::models::IdList;
use crate::domain::gw2::models::UpstreamRequest;
use crate::inbound::http::router::AppState;

type ProxyResult = Result<Json<Value>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct IdsQuery {
    ids: Option<String>,
}

#[derive(Deserialize)]
pub struct KeyQuery {
    api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct RecipeSearchQuery {
    input_item_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct GuildSearchQuery {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MatchesQuery {
    world_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CoinsQuery {
    coins: u64,
}

#[derive(Debug, Deserialize)]
pub struct GemsQuery {
    gems: u64,
}

async fn forward(state: &AppState, request: UpstreamRequest) -> ProxyResult {
    Ok(Json(state.gw2_service.fetch(request).await?))
}

pub async fn collection(state: AppState, query: IdsQuery, collection: Collection) -> ProxyResult {
    let ids = IdList::parse_optional(query.ids.as_deref(), collection.ids)
        .map_err(Gw2Error::from)?;

    forward(&state, UpstreamRequest::new(collection.path).ids(ids)).await
}

pub async fn plain(state: AppState, path: &'static str) -> ProxyResult {
    forward(&state, UpstreamRequest::new(path)).await
}

pub async fn by_id(state: AppState, id: u64, path: &'static str) -> ProxyResult {
    forward(&state, UpstreamRequest::new(path).segment(id)).await
}

pub async fn keyed(state: AppState, query: KeyQuery, path: &'static str) -> ProxyResult {
    let key = ApiKey::new(query.api_key)?;

    forward(&state, UpstreamRequest::new(path).api_key(key)).await
}

pub async fn character(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<KeyQuery>,
) -> ProxyResult {
    let key = ApiKey::new(query.api_key)?;

    forward(
        &state,
        UpstreamRequest::new("characters").segment(name).api_key(key),
    )
    .await
}

pub async fn search_recipes(
    State(state): State<AppState>,
    Query(query): Query<RecipeSearchQuery>,
) -> ProxyResult {
    forward(
        &state,
        UpstreamRequest::new("recipes/search").query("input", query.input_item_id),
    )
    .await
}

pub async fn search_guilds(
    State(state): State<AppState>,
    Query(query): Query<GuildSearchQuery>,
) -> ProxyResult {
    forward(
        &state,
        UpstreamRequest::new("guild/search").query("name", query.name),
    )
    .await
}

pub async fn guild(State(state): State<AppState>, Path(guild_id): Path<String>) -> ProxyResult {
    forward(&state, UpstreamRequest::new("guild").segment(guild_id)).await
}

pub async fn guild_emblem(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
) -> ProxyResult {
    forward(
        &state,
        UpstreamRequest::new("guild").segment(guild_id).segment("emblem"),
    )
    .await
}

pub async fn wvw_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchesQuery>,
) -> ProxyResult {
    let request = match query.world_id {
        Some(world) => UpstreamRequest::new("wvw/matches").query("world", world),
        None => UpstreamRequest::new("wvw/matches"),
    };

    forward(&state, request).await
}

pub async fn wvw_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> ProxyResult {
    forward(&state, UpstreamRequest::new("wvw/matches").segment(match_id)).await
}

pub async fn exchange_coins(
    State(state): State<AppState>,
    Query(query): Query<CoinsQuery>,
) -> ProxyResult {
    forward(
        &state,
        UpstreamRequest::new("commerce/exchange/coins").query("quantity", query.coins),
    )
    .await
}

pub async fn exchange_gems(
    State(state): State<AppState>,
    Query(query): Query<GemsQuery>,
) -> ProxyResult {
    forward(
        &state,
        UpstreamRequest::new("commerce/exchange/gems").query("quantity", query.gems),
    )
    .await
}
