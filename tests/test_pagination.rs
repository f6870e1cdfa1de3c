use accord::http::{PageSource, Paginator};
use accord::model::id::MessageId;
use accord::{Error, Result};
use async_trait::async_trait;
use futures::StreamExt;

/// A channel history of messages `1..=total`, served newest first with a `before` cursor.
struct History {
    total: u64,
    requests: usize,
    fail_on: Option<usize>,
}

impl History {
    fn new(total: u64) -> Self {
        Self {
            total,
            requests: 0,
            fail_on: None,
        }
    }
}

#[async_trait]
impl PageSource for History {
    type Item = MessageId;
    type Cursor = MessageId;

    fn page_size(&self) -> u16 {
        50
    }

    async fn fetch_page(
        &mut self,
        cursor: Option<MessageId>,
        limit: u16,
    ) -> Result<Vec<MessageId>> {
        self.requests += 1;

        if self.fail_on == Some(self.requests) {
            return Err(Error::Other("connection reset"));
        }

        let before = cursor.map_or(self.total + 1, MessageId::get);
        Ok((1..before).rev().take(usize::from(limit)).map(MessageId::new).collect())
    }

    fn cursor_of(item: &MessageId) -> MessageId {
        *item
    }
}

#[tokio::test]
async fn walks_the_whole_history() {
    let ids: Vec<u64> = Paginator::new(History::new(120))
        .stream()
        .map(|id| id.unwrap().get())
        .collect()
        .await;

    assert_eq!(ids.len(), 120);
    assert_eq!(ids.first(), Some(&120));
    assert_eq!(ids.last(), Some(&1));
}

#[tokio::test]
async fn exhausted_paginator_stays_silent() {
    let mut paginator = Paginator::new(History::new(30));

    let first = paginator.next_page().await.unwrap().unwrap();
    assert_eq!(first.len(), 30);
    assert!(paginator.is_exhausted());

    assert!(paginator.next_page().await.unwrap().is_none());
    assert!(paginator.next().await.is_none());
}

#[tokio::test]
async fn empty_list_yields_nothing() {
    let mut paginator = Paginator::new(History::new(0));

    assert!(paginator.next().await.is_none());
    assert!(paginator.is_exhausted());
}

#[tokio::test]
async fn starts_after_the_given_cursor() {
    let ids: Vec<u64> = Paginator::new(History::new(120))
        .starting_from(MessageId::new(11))
        .stream()
        .map(|id| id.unwrap().get())
        .collect()
        .await;

    assert_eq!(ids, (1..=10).rev().collect::<Vec<_>>());
}

#[tokio::test]
async fn cap_limits_the_items() {
    let ids: Vec<u64> = Paginator::new(History::new(120))
        .limit(60)
        .stream()
        .map(|id| id.unwrap().get())
        .collect()
        .await;

    assert_eq!(ids.len(), 60);
    assert_eq!(ids.last(), Some(&61));
}

#[tokio::test]
async fn failed_page_is_retried_from_the_same_cursor() {
    let mut source = History::new(120);
    source.fail_on = Some(2);
    let mut paginator = Paginator::new(source);

    assert_eq!(paginator.next_page().await.unwrap().unwrap().len(), 50);
    assert!(paginator.next_page().await.is_err());

    let page = paginator.next_page().await.unwrap().unwrap();
    assert_eq!(page.first(), Some(&MessageId::new(70)));
}
