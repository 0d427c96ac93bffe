use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use warp::Filter;
use warp::http::StatusCode;

use crate::config::Config;
use crate::sessions::SessionStore;
use crate::words::WordProvider;
use game_core::{GameSession, word_length_for_level};
use game_persistence::repositories::ScoreRepository;
use game_types::{
    GameError, GuessRequest, GuessView, HintRequest, HintView, NewGameRequest, NextLevelRequest,
    ScoreSubmission, SessionView,
};

pub mod config;
pub mod sessions;
pub mod words;

pub const DEFAULT_TOPIC: &str = "animals";

#[derive(Deserialize)]
struct LimitQuery {
    limit: Option<u64>,
}

pub fn create_routes(
    sessions: Arc<SessionStore>,
    word_provider: Arc<dyn WordProvider>,
    scores: Arc<ScoreRepository>,
    config: &Config,
) -> impl Filter<Extract = impl warp::Reply + use<>, Error = warp::Rejection> + Clone + use<> {
    // Clone for filters
    let sessions_filter = warp::any().map({
        let sessions = sessions.clone();
        move || sessions.clone()
    });

    let words_filter = warp::any().map({
        let word_provider = word_provider.clone();
        move || word_provider.clone()
    });

    let scores_filter = warp::any().map({
        let scores = scores.clone();
        move || scores.clone()
    });

    // Health check endpoint
    let health = warp::path!("api" / "health")
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({ "ok": true })));

    let new_game = warp::path!("api" / "new-game")
        .and(warp::post())
        .and(json_body::<NewGameRequest>())
        .and(sessions_filter.clone())
        .and(words_filter.clone())
        .and_then(handle_new_game);

    let guess = warp::path!("api" / "guess")
        .and(warp::post())
        .and(json_body::<GuessRequest>())
        .and(sessions_filter.clone())
        .and_then(handle_guess);

    let hint = warp::path!("api" / "hint")
        .and(warp::post())
        .and(json_body::<HintRequest>())
        .and(sessions_filter.clone())
        .and_then(handle_hint);

    let next_level = warp::path!("api" / "next-level")
        .and(warp::post())
        .and(json_body::<NextLevelRequest>())
        .and(sessions_filter.clone())
        .and(words_filter.clone())
        .and_then(handle_next_level);

    let submit_score = warp::path!("api" / "score")
        .and(warp::post())
        .and(json_body::<ScoreSubmission>())
        .and(scores_filter.clone())
        .and_then(handle_submit_score);

    let leaderboard = warp::path!("api" / "leaderboard")
        .and(warp::get())
        .and(warp::query::<LimitQuery>())
        .and(scores_filter.clone())
        .and_then(handle_leaderboard);

    let player_scores = warp::path!("api" / "player" / String / "scores")
        .and(warp::get())
        .and(warp::query::<LimitQuery>())
        .and(scores_filter.clone())
        .and_then(handle_player_scores);

    // CORS configuration
    let cors = {
        let mut cors = warp::cors()
            .allow_headers(vec!["content-type"])
            .allow_methods(vec!["GET", "POST"]);
        if config.cors_origins.iter().any(|origin| origin == "*") {
            cors = cors.allow_any_origin();
        } else {
            for origin in &config.cors_origins {
                cors = cors.allow_origin(origin.as_str());
            }
        }
        cors
    };

    health
        .or(new_game)
        .or(guess)
        .or(hint)
        .or(next_level)
        .or(submit_score)
        .or(leaderboard)
        .or(player_scores)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::log("word_guess"))
}

fn json_body<T: DeserializeOwned + Send>()
-> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(16 * 1024).and(warp::body::json())
}

fn error_reply(status: StatusCode, code: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": code })),
        status,
    )
}

fn game_error_reply(err: &GameError) -> warp::reply::WithStatus<warp::reply::Json> {
    let status = match err {
        GameError::GameNotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    error_reply(status, err.code())
}

fn session_view(session: &GameSession) -> SessionView {
    SessionView {
        game_id: session.id,
        masked: session.masked(),
        lives: session.lives,
        status: session.status,
        guessed: session.guessed.clone(),
        level: session.level,
        topic: session.topic.clone(),
        word_length: session.word_length(),
    }
}

async fn handle_new_game(
    request: NewGameRequest,
    sessions: Arc<SessionStore>,
    word_provider: Arc<dyn WordProvider>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let topic = request.topic.unwrap_or_else(|| DEFAULT_TOPIC.to_string());
    let level = request.level.unwrap_or(1).max(1);

    let word = word_provider
        .fetch_word(&topic, word_length_for_level(level))
        .await;

    let session = GameSession::new(Uuid::new_v4(), word, level, topic);
    let view = session_view(&session);
    sessions.insert(session);

    tracing::info!(game_id = %view.game_id, level, topic = %view.topic, "created game");
    Ok(warp::reply::with_status(
        warp::reply::json(&view),
        StatusCode::OK,
    ))
}

async fn handle_guess(
    request: GuessRequest,
    sessions: Arc<SessionStore>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let outcome = sessions.with_session(&request.game_id, |session| {
        session.guess(&request.letter).map(|_| GuessView {
            game_id: session.id,
            masked: session.masked(),
            lives: session.lives,
            status: session.status,
            guessed: session.guessed.clone(),
            answer: session.answer().map(str::to_string),
            level: session.level,
            topic: session.topic.clone(),
        })
    });

    Ok(match outcome {
        None => game_error_reply(&GameError::GameNotFound),
        Some(Err(err)) => game_error_reply(&err),
        Some(Ok(view)) => warp::reply::with_status(warp::reply::json(&view), StatusCode::OK),
    })
}

async fn handle_hint(
    request: HintRequest,
    sessions: Arc<SessionStore>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let outcome = sessions.with_session(&request.game_id, |session| {
        session.hint().map(|revealed| HintView {
            game_id: session.id,
            masked: session.masked(),
            revealed_letter: revealed.letter,
            revealed_position: revealed.position,
            guessed: session.guessed.clone(),
            lives: session.lives,
            status: session.status,
        })
    });

    Ok(match outcome {
        None => game_error_reply(&GameError::GameNotFound),
        Some(Err(err)) => game_error_reply(&err),
        Some(Ok(view)) => warp::reply::with_status(warp::reply::json(&view), StatusCode::OK),
    })
}

async fn handle_next_level(
    request: NextLevelRequest,
    sessions: Arc<SessionStore>,
    word_provider: Arc<dyn WordProvider>,
) -> Result<impl warp::Reply, warp::Rejection> {
    // Fetch the new word outside the session lock: generation can take
    // seconds and must not stall other requests for this session's shard.
    let Some((topic, next_level)) = sessions.with_session(&request.game_id, |session| {
        (session.topic.clone(), session.level + 1)
    }) else {
        return Ok(game_error_reply(&GameError::GameNotFound));
    };

    let word = word_provider
        .fetch_word(&topic, word_length_for_level(next_level))
        .await;

    let view = sessions.with_session(&request.game_id, |session| {
        session.advance_level(word);
        session_view(session)
    });

    Ok(match view {
        // Evicted while the word was being generated.
        None => game_error_reply(&GameError::GameNotFound),
        Some(view) => {
            tracing::info!(game_id = %view.game_id, level = view.level, "advanced level");
            warp::reply::with_status(warp::reply::json(&view), StatusCode::OK)
        }
    })
}

async fn handle_submit_score(
    submission: ScoreSubmission,
    scores: Arc<ScoreRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match scores.insert(&submission).await {
        Ok(record) => Ok(warp::reply::with_status(
            warp::reply::json(&record),
            StatusCode::CREATED,
        )),
        Err(err) => {
            tracing::error!("Failed to save score: {}", err);
            Ok(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "score_save_failed",
            ))
        }
    }
}

async fn handle_leaderboard(
    query: LimitQuery,
    scores: Arc<ScoreRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match scores.top_scores(query.limit).await {
        Ok(records) => Ok(warp::reply::with_status(
            warp::reply::json(&records),
            StatusCode::OK,
        )),
        Err(err) => {
            tracing::error!("Failed to fetch leaderboard: {}", err);
            Ok(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "leaderboard_unavailable",
            ))
        }
    }
}

async fn handle_player_scores(
    player: String,
    query: LimitQuery,
    scores: Arc<ScoreRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match scores.scores_by_player(&player, query.limit).await {
        Ok(records) => Ok(warp::reply::with_status(
            warp::reply::json(&records),
            StatusCode::OK,
        )),
        Err(err) => {
            tracing::error!("Failed to fetch player scores: {}", err);
            Ok(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "player_scores_unavailable",
            ))
        }
    }
}

async fn handle_rejection(
    err: warp::Rejection,
) -> Result<impl warp::Reply, std::convert::Infallible> {
    let reply = if err.is_not_found() {
        error_reply(StatusCode::NOT_FOUND, "not_found")
    } else if err
        .find::<warp::filters::body::BodyDeserializeError>()
        .is_some()
    {
        error_reply(StatusCode::BAD_REQUEST, "invalid_body")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        error_reply(StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed")
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        error_reply(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
    };

    Ok(reply)
}
