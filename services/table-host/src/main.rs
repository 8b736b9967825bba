use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State as AxumState;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};
use wheelhouse_engine::{FileStore, Table, TableCatalog};
use wheelhouse_types::{AccountId, ActiveBonus, TableError, TableEvent};

#[derive(Clone, Debug)]
struct TableHostConfig {
    starting_balance: u64,
    min_stake: u64,
    max_stake: u64,
    require_open_bets: bool,
    max_double_escalations: u8,
    max_wagers_per_round: usize,
    catalog: String,
    ledger_path: String,
}

impl TableHostConfig {
    fn from_env() -> Self {
        Self {
            starting_balance: read_u64("TABLE_STARTING_BALANCE", 0),
            min_stake: read_u64("TABLE_MIN_STAKE", 1),
            max_stake: read_u64("TABLE_MAX_STAKE", u64::MAX),
            require_open_bets: read_flag("TABLE_REQUIRE_OPEN_BETS", true),
            max_double_escalations: read_u8("TABLE_MAX_DOUBLES", 8),
            max_wagers_per_round: read_usize("TABLE_MAX_WAGERS", 256),
            catalog: std::env::var("TABLE_CATALOG").unwrap_or_else(|_| "classic".to_string()),
            ledger_path: std::env::var("TABLE_LEDGER_PATH")
                .unwrap_or_else(|_| "table-ledger.json".to_string()),
        }
    }

    fn table_config(&self) -> wheelhouse_types::TableConfig {
        wheelhouse_types::TableConfig {
            starting_balance: self.starting_balance,
            min_stake: self.min_stake,
            max_stake: self.max_stake,
            require_open_bets: self.require_open_bets,
            max_double_escalations: self.max_double_escalations,
            max_wagers_per_round: self.max_wagers_per_round,
        }
    }
}

fn read_u64(key: &str, fallback: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(fallback)
}

fn read_u8(key: &str, fallback: u8) -> u8 {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<u8>().ok())
        .unwrap_or(fallback)
}

fn read_usize(key: &str, fallback: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(fallback)
}

fn read_flag(key: &str, fallback: bool) -> bool {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        })
        .unwrap_or(fallback)
}

#[derive(Clone)]
struct AppState {
    table: Arc<Mutex<Table<FileStore>>>,
    broadcaster: broadcast::Sender<TableEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum InboundMessage {
    #[serde(rename = "placeBet")]
    PlaceBet {
        #[serde(rename = "requestId")]
        request_id: String,
        #[serde(rename = "accountId")]
        account_id: String,
        #[serde(rename = "displayName")]
        display_name: String,
        stake: u64,
        label: String,
    },
    #[serde(rename = "lockBetting")]
    LockBetting {
        #[serde(rename = "requestId")]
        request_id: String,
    },
    #[serde(rename = "resolvePrimary")]
    ResolvePrimary {
        #[serde(rename = "requestId")]
        request_id: String,
        label: String,
        #[serde(rename = "externalFactor", default)]
        external_factor: Option<u64>,
    },
    #[serde(rename = "resolveBonus")]
    ResolveBonus {
        #[serde(rename = "requestId")]
        request_id: String,
        label: String,
    },
    #[serde(rename = "balance")]
    Balance {
        #[serde(rename = "requestId")]
        request_id: String,
        #[serde(rename = "accountId")]
        account_id: String,
    },
    #[serde(rename = "deposit")]
    Deposit {
        #[serde(rename = "requestId")]
        request_id: String,
        #[serde(rename = "accountId")]
        account_id: String,
        amount: u64,
    },
    #[serde(rename = "state")]
    State {
        #[serde(rename = "requestId")]
        request_id: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum OutboundResponse {
    #[serde(rename = "ack")]
    Ack {
        #[serde(rename = "requestId")]
        request_id: String,
    },
    #[serde(rename = "error")]
    Error {
        #[serde(rename = "requestId")]
        request_id: String,
        code: String,
        message: String,
    },
    #[serde(rename = "balance")]
    Balance {
        #[serde(rename = "requestId")]
        request_id: String,
        account: String,
        balance: u64,
    },
    #[serde(rename = "state")]
    State {
        #[serde(rename = "requestId")]
        request_id: String,
        #[serde(rename = "roundId")]
        round_id: u64,
        phase: &'static str,
        wagers: usize,
        #[serde(rename = "totalStaked")]
        total_staked: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        bonus: Option<BonusView>,
    },
}

#[derive(Debug, Serialize)]
struct BonusView {
    game: String,
    values: Vec<u64>,
    #[serde(rename = "doubleAvailable")]
    double_available: bool,
    #[serde(rename = "doublesApplied")]
    doubles_applied: u8,
    #[serde(rename = "activationFactor")]
    activation_factor: u64,
}

impl From<&ActiveBonus> for BonusView {
    fn from(bonus: &ActiveBonus) -> Self {
        Self {
            game: bonus.game.clone(),
            values: bonus.values.clone(),
            double_available: bonus.double_available,
            doubles_applied: bonus.doubles_applied,
            activation_factor: bonus.activation_factor,
        }
    }
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    AxumState(state): AxumState<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let mut broadcast_rx = state.broadcaster.subscribe();

    let write_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let broadcast_task = {
        let tx = tx.clone();
        tokio::spawn(async move {
            while let Ok(event) = broadcast_rx.recv().await {
                if let Ok(payload) = serde_json::to_string(&event) {
                    let _ = tx.send(Message::Text(payload));
                }
            }
        })
    };

    while let Some(Ok(message)) = receiver.next().await {
        match message {
            Message::Text(text) => match serde_json::from_str::<InboundMessage>(&text) {
                Ok(inbound) => {
                    handle_inbound(inbound, &state, &tx);
                }
                Err(err) => {
                    warn!(?err, "invalid inbound message");
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    write_task.abort();
    broadcast_task.abort();
}

fn handle_inbound(inbound: InboundMessage, state: &AppState, tx: &mpsc::UnboundedSender<Message>) {
    match inbound {
        InboundMessage::PlaceBet {
            request_id,
            account_id,
            display_name,
            stake,
            label,
        } => {
            let response = {
                let mut table = state.table.lock().unwrap();
                let account = AccountId::from(account_id);
                match table.place_bet(account.clone(), &display_name, stake, &label) {
                    Ok(event) => {
                        state.broadcaster.send(event).ok();
                        OutboundResponse::Ack { request_id }
                    }
                    Err(err) => {
                        state
                            .broadcaster
                            .send(TableEvent::BetRejected {
                                round_id: table.round_id(),
                                account,
                                display_name,
                                code: err.code().to_string(),
                                reason: err.to_string(),
                            })
                            .ok();
                        error_response(request_id, err)
                    }
                }
            };
            send_response(tx, response);
        }
        InboundMessage::LockBetting { request_id } => {
            let response = {
                let mut table = state.table.lock().unwrap();
                match table.lock_betting() {
                    Ok(event) => {
                        state.broadcaster.send(event).ok();
                        OutboundResponse::Ack { request_id }
                    }
                    Err(err) => error_response(request_id, err),
                }
            };
            send_response(tx, response);
        }
        InboundMessage::ResolvePrimary {
            request_id,
            label,
            external_factor,
        } => {
            let response = {
                let mut table = state.table.lock().unwrap();
                match table.resolve_primary(&label, external_factor.unwrap_or(1)) {
                    Ok(events) => {
                        for event in events {
                            state.broadcaster.send(event).ok();
                        }
                        OutboundResponse::Ack { request_id }
                    }
                    Err(err) => error_response(request_id, err),
                }
            };
            send_response(tx, response);
        }
        InboundMessage::ResolveBonus { request_id, label } => {
            let response = {
                let mut table = state.table.lock().unwrap();
                match table.resolve_bonus(&label) {
                    Ok(events) => {
                        for event in events {
                            state.broadcaster.send(event).ok();
                        }
                        OutboundResponse::Ack { request_id }
                    }
                    Err(err) => error_response(request_id, err),
                }
            };
            send_response(tx, response);
        }
        InboundMessage::Balance {
            request_id,
            account_id,
        } => {
            let response = {
                let table = state.table.lock().unwrap();
                let balance = table.balance(&AccountId::from(account_id.as_str()));
                OutboundResponse::Balance {
                    request_id,
                    account: account_id,
                    balance,
                }
            };
            send_response(tx, response);
        }
        InboundMessage::Deposit {
            request_id,
            account_id,
            amount,
        } => {
            let response = {
                let mut table = state.table.lock().unwrap();
                match table.deposit(&AccountId::from(account_id.as_str()), amount) {
                    Ok(balance) => OutboundResponse::Balance {
                        request_id,
                        account: account_id,
                        balance,
                    },
                    Err(err) => error_response(request_id, err),
                }
            };
            send_response(tx, response);
        }
        InboundMessage::State { request_id } => {
            let response = {
                let table = state.table.lock().unwrap();
                let total_staked = table
                    .wagers()
                    .iter()
                    .fold(0u64, |acc, wager| acc.saturating_add(wager.stake));
                OutboundResponse::State {
                    request_id,
                    round_id: table.round_id(),
                    phase: table.phase().as_str(),
                    wagers: table.wagers().len(),
                    total_staked,
                    bonus: table.active_bonus().map(BonusView::from),
                }
            };
            send_response(tx, response);
        }
    }
}

fn send_response(tx: &mpsc::UnboundedSender<Message>, response: OutboundResponse) {
    if let Ok(payload) = serde_json::to_string(&response) {
        let _ = tx.send(Message::Text(payload));
    }
}

fn error_response(request_id: String, err: TableError) -> OutboundResponse {
    OutboundResponse::Error {
        request_id,
        code: err.code().to_string(),
        message: err.to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let host = std::env::var("TABLE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("TABLE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(9140);

    let config = TableHostConfig::from_env();
    let catalog = TableCatalog::by_name(&config.catalog)
        .with_context(|| format!("unknown catalog preset: {}", config.catalog))?;
    let store = FileStore::new(&config.ledger_path);
    let table = Table::open(config.table_config(), catalog, store)?;
    let table = Arc::new(Mutex::new(table));
    let (broadcaster, _) = broadcast::channel::<TableEvent>(1024);

    let state = AppState {
        table,
        broadcaster,
    };

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/healthz", get(healthz))
        .with_state(state);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("invalid listen addr")?;
    info!(%addr, catalog = %config.catalog, "table host listening");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}
