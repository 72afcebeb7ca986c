//! Session management tests

use std::sync::Arc;
use std::time::Duration;

use leave_core::{InMemoryLedger, SeedData};
use leave_mcp::{
    ChannelSink, ChannelSource, CloseReason, McpError, McpServer, SessionBridge, SessionManager,
};
use tokio::sync::mpsc;

#[test]
fn test_session_manager_creation() {
    let manager = SessionManager::new();
    assert_eq!(manager.active_sessions(), 0);
    assert!(manager.session_ids().is_empty());
}

#[test]
fn test_open_session() {
    let manager = SessionManager::new();

    let opened = manager.open_session().unwrap();
    assert_eq!(opened.session_id.len(), 32);
    assert!(!opened.cancel.is_cancelled());

    let info = manager.get_session(&opened.session_id).unwrap();
    assert_eq!(info.session_id, opened.session_id);
    assert_eq!(manager.active_sessions(), 1);
}

#[test]
fn test_session_ids_are_unique() {
    let manager = SessionManager::new();
    let a = manager.open_session().unwrap();
    let b = manager.open_session().unwrap();

    assert_ne!(a.session_id, b.session_id);
    assert_eq!(manager.active_sessions(), 2);
}

#[tokio::test]
async fn test_deliver_reaches_inbound_channel() {
    let manager = SessionManager::new();
    let mut opened = manager.open_session().unwrap();

    manager
        .deliver(&opened.session_id, "{\"frame\": 1}".to_string())
        .await
        .unwrap();

    assert_eq!(opened.inbound.recv().await.unwrap(), "{\"frame\": 1}");
}

#[tokio::test]
async fn test_deliver_unknown_session() {
    let manager = SessionManager::new();
    let result = manager.deliver("missing", "{}".to_string()).await;
    assert!(matches!(result, Err(McpError::SessionNotFound(_))));
}

#[tokio::test]
async fn test_deliver_after_receiver_dropped() {
    let manager = SessionManager::new();
    let opened = manager.open_session().unwrap();
    let session_id = opened.session_id.clone();
    drop(opened);

    let result = manager.deliver(&session_id, "{}".to_string()).await;
    assert!(matches!(result, Err(McpError::SessionClosed(_))));
}

#[test]
fn test_close_session_cancels_token() {
    let manager = SessionManager::new();
    let opened = manager.open_session().unwrap();

    manager.close_session(&opened.session_id).unwrap();

    assert!(opened.cancel.is_cancelled());
    assert_eq!(manager.active_sessions(), 0);
    assert!(matches!(
        manager.get_session(&opened.session_id),
        Err(McpError::SessionNotFound(_))
    ));
    assert!(manager.close_session(&opened.session_id).is_err());
}

#[test]
fn test_close_all() {
    let manager = SessionManager::new();
    let a = manager.open_session().unwrap();
    let b = manager.open_session().unwrap();

    manager.close_all();

    assert!(a.cancel.is_cancelled());
    assert!(b.cancel.is_cancelled());
    assert_eq!(manager.active_sessions(), 0);
}

#[tokio::test]
async fn test_managed_session_end_to_end() {
    let manager = Arc::new(SessionManager::new().with_channel_capacity(4));
    let server = Arc::new(McpServer::new(Arc::new(InMemoryLedger::from_seed(
        SeedData::reference(),
    ))));

    let opened = manager.open_session().unwrap();
    let session_id = opened.session_id.clone();
    let (out_tx, mut out_rx) = mpsc::channel(4);

    let bridge_task = tokio::spawn(async move {
        SessionBridge::new(server)
            .with_session_id(opened.session_id)
            .run(
                ChannelSource::new(opened.inbound),
                ChannelSink::new(out_tx),
                opened.cancel,
            )
            .await
    });

    manager
        .deliver(
            &session_id,
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"get_leave_balance","arguments":{"employee_id":"E001"}}}"#.to_string(),
        )
        .await
        .unwrap();

    let frame = out_rx.recv().await.unwrap();
    assert!(frame.contains("E001 has 18 leave days remaining."));

    manager.close_session(&session_id).unwrap();
    let summary = tokio::time::timeout(Duration::from_secs(1), bridge_task)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(summary.session_id, session_id);
    assert_eq!(summary.close_reason, CloseReason::Cancelled);
}
