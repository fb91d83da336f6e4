//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use kdash_broker::BrokerClient;

use crate::aggregator::{build_report, list_topic_summaries, FetchOptions};
use crate::message::Message;
use crate::UpdateAction;

/// Execute an action by spawning a background task.
///
/// The task reports back over `msg_tx`; the event loop never waits on the
/// broker directly.
pub fn handle_action<C>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    client: Arc<C>,
    options: FetchOptions,
) -> tokio::task::JoinHandle<()>
where
    C: BrokerClient + Sync + 'static,
{
    match action {
        UpdateAction::DescribeTopic { topic } => tokio::spawn(async move {
            let message = match build_report(client.as_ref(), &topic, &options).await {
                Ok(report) => Message::TopicReportReady { report },
                Err(e) => Message::TopicReportFailed {
                    topic,
                    message: e.to_string(),
                },
            };
            send(&msg_tx, message).await;
        }),

        UpdateAction::RefreshTopics => tokio::spawn(async move {
            let message = match list_topic_summaries(client.as_ref()).await {
                Ok(topics) => Message::TopicsLoaded { topics },
                Err(e) => {
                    warn!("Topic refresh failed: {}", e);
                    Message::TopicsLoadFailed {
                        message: e.to_string(),
                    }
                }
            };
            send(&msg_tx, message).await;
        }),
    }
}

async fn send(msg_tx: &mpsc::Sender<Message>, message: Message) {
    if msg_tx.send(message).await.is_err() {
        debug!("Event loop gone; dropping background result");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kdash_broker::test_utils::{BrokerCall, FakeCluster, FakePartition, FakeTopic};

    fn cluster() -> FakeCluster {
        FakeCluster::new().with_topic(
            FakeTopic::new("orders")
                .with_config("retention.ms", "1000")
                .with_partition(FakePartition::new(0, 0, 5)),
        )
    }

    #[tokio::test]
    async fn test_describe_action_reports_back() {
        let (tx, mut rx) = mpsc::channel(4);
        let action = UpdateAction::DescribeTopic {
            topic: "orders".into(),
        };

        handle_action(action, tx, Arc::new(cluster()), FetchOptions::default())
            .await
            .unwrap();

        match rx.recv().await {
            Some(Message::TopicReportReady { report }) => {
                assert_eq!(report.topic, "orders");
                assert_eq!(report.partition_count(), 1);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_describe_action_reports_config_failure() {
        let (tx, mut rx) = mpsc::channel(4);
        let client = Arc::new(cluster().fail_on(BrokerCall::DescribeConfig("orders".into())));

        handle_action(
            UpdateAction::DescribeTopic {
                topic: "orders".into(),
            },
            tx,
            client,
            FetchOptions::default(),
        )
        .await
        .unwrap();

        match rx.recv().await {
            Some(Message::TopicReportFailed { topic, message }) => {
                assert_eq!(topic, "orders");
                assert!(message.contains("Failed to fetch configuration"));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_refresh_action_lists_topics() {
        let (tx, mut rx) = mpsc::channel(4);

        handle_action(
            UpdateAction::RefreshTopics,
            tx,
            Arc::new(cluster()),
            FetchOptions::default(),
        )
        .await
        .unwrap();

        assert!(matches!(
            rx.recv().await,
            Some(Message::TopicsLoaded { ref topics }) if topics.len() == 1
        ));
    }

    #[tokio::test]
    async fn test_closed_channel_does_not_panic() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let handle = handle_action(
            UpdateAction::RefreshTopics,
            tx,
            Arc::new(cluster()),
            FetchOptions::default(),
        );
        assert!(handle.await.is_ok());
    }
}
