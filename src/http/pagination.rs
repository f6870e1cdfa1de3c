//! Cursor based pagination over list endpoints.
//!
//! A list endpoint returns at most one page of items per request, in a stable id order. A
//! [`Paginator`] repeatedly asks its [`PageSource`] for the page following the last item it saw,
//! and stops as soon as a page comes back shorter than requested: a short page proves there is
//! nothing left, so no trailing empty request is made. Only a full last page costs one extra
//! request, which comes back empty.

use std::collections::VecDeque;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use tracing::trace;

use super::{GuildPagination, Http, MessagePagination};
use crate::constants::{BANS_PAGE_SIZE, GUILDS_PAGE_SIZE, MEMBERS_PAGE_SIZE, MESSAGES_PAGE_SIZE};
use crate::internal::prelude::*;
use crate::model::channel::Message;
use crate::model::guild::{Ban, GuildInfo, Member};
use crate::model::id::{ChannelId, GuildId, MessageId, UserId};

/// One paginated list endpoint.
#[async_trait]
pub trait PageSource: Send {
    /// The type of the listed items.
    type Item: Send;
    /// The identifier the endpoint uses as a page boundary.
    type Cursor: Copy + Send;

    /// The maximum amount of items the endpoint returns per request.
    fn page_size(&self) -> u16;

    /// Fetches up to `limit` items following `cursor`, or the first page if `cursor` is [`None`].
    async fn fetch_page(
        &mut self,
        cursor: Option<Self::Cursor>,
        limit: u16,
    ) -> Result<Vec<Self::Item>>;

    /// The cursor to continue from after the given item.
    fn cursor_of(item: &Self::Item) -> Self::Cursor;
}

/// Walks a [`PageSource`] page by page.
///
/// The paginator owns its cursor. It is either able to fetch more data, or exhausted; once
/// exhausted, it never makes another request.
pub struct Paginator<S: PageSource> {
    source: S,
    cursor: Option<S::Cursor>,
    buffer: VecDeque<S::Item>,
    remaining: Option<u64>,
    exhausted: bool,
}

impl<S: PageSource> Paginator<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            cursor: None,
            buffer: VecDeque::new(),
            remaining: None,
            exhausted: false,
        }
    }

    /// Starts the walk after the given cursor, exclusively, instead of at the first page.
    #[must_use]
    pub fn starting_from(mut self, cursor: S::Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Caps the total number of items the paginator yields. When fewer items than a full page
    /// are left under the cap, only that many are requested.
    #[must_use]
    pub fn limit(mut self, total: u64) -> Self {
        self.remaining = Some(total);
        self
    }

    /// Whether the paginator reached the end of the list, or its cap.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted && self.buffer.is_empty()
    }

    /// Returns the next page of items, or [`None`] once the list is exhausted.
    ///
    /// Items already buffered by [`Self::next`] are returned first, as a page of their own.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying request. The cursor is left untouched, so the same
    /// page is requested again on the next call.
    pub async fn next_page(&mut self) -> Result<Option<Vec<S::Item>>> {
        if !self.buffer.is_empty() {
            return Ok(Some(self.buffer.drain(..).collect()));
        }

        if self.exhausted {
            return Ok(None);
        }

        let page_size = self.source.page_size();
        let limit = match self.remaining {
            Some(0) => {
                self.exhausted = true;
                return Ok(None);
            },
            Some(remaining) => u16::try_from(remaining).map_or(page_size, |r| r.min(page_size)),
            None => page_size,
        };

        let mut page = self.source.fetch_page(self.cursor, limit).await?;
        page.truncate(usize::from(limit));

        trace!("Fetched a page of {} items (limit {limit})", page.len());

        if page.len() < usize::from(limit) {
            self.exhausted = true;
        }

        if let Some(remaining) = &mut self.remaining {
            *remaining -= page.len() as u64;

            if *remaining == 0 {
                self.exhausted = true;
            }
        }

        match page.last() {
            Some(last) => {
                self.cursor = Some(S::cursor_of(last));
                Ok(Some(page))
            },
            None => Ok(None),
        }
    }

    /// Returns the next item, fetching a new page when the buffered one is consumed.
    ///
    /// After an error is returned, the paginator is exhausted.
    pub async fn next(&mut self) -> Option<Result<S::Item>> {
        if let Some(item) = self.buffer.pop_front() {
            return Some(Ok(item));
        }

        match self.next_page().await {
            Ok(Some(page)) => {
                self.buffer.extend(page);
                self.buffer.pop_front().map(Ok)
            },
            Ok(None) => None,
            Err(why) => {
                self.exhausted = true;
                Some(Err(why))
            },
        }
    }

    /// Turns the paginator into a [`Stream`] of items.
    ///
    /// [`Stream`]: futures::Stream
    pub fn stream<'a>(self) -> BoxStream<'a, Result<S::Item>>
    where
        S: 'a,
        S::Cursor: 'a,
        S::Item: 'a,
    {
        stream::unfold(self, |mut paginator| async move {
            let item = paginator.next().await?;
            Some((item, paginator))
        })
        .boxed()
    }
}

/// The messages of a channel, newest first, walked with the `before` cursor.
pub struct MessagesIter<H: AsRef<Http>> {
    http: H,
    channel_id: ChannelId,
}

impl<H: AsRef<Http>> MessagesIter<H> {
    pub fn new(http: H, channel_id: ChannelId) -> Self {
        Self {
            http,
            channel_id,
        }
    }
}

#[async_trait]
impl<H: AsRef<Http> + Send + Sync> PageSource for MessagesIter<H> {
    type Item = Message;
    type Cursor = MessageId;

    fn page_size(&self) -> u16 {
        MESSAGES_PAGE_SIZE
    }

    async fn fetch_page(&mut self, cursor: Option<MessageId>, limit: u16) -> Result<Vec<Message>> {
        let limit = u8::try_from(limit).unwrap_or(u8::MAX);

        self.http
            .as_ref()
            .get_messages(self.channel_id, cursor.map(MessagePagination::Before), Some(limit))
            .await
    }

    fn cursor_of(message: &Message) -> MessageId {
        message.id
    }
}

/// The members of a guild, in ascending user id order, walked with the `after` cursor.
pub struct MembersIter<H: AsRef<Http>> {
    http: H,
    guild_id: GuildId,
}

impl<H: AsRef<Http>> MembersIter<H> {
    pub fn new(http: H, guild_id: GuildId) -> Self {
        Self {
            http,
            guild_id,
        }
    }
}

#[async_trait]
impl<H: AsRef<Http> + Send + Sync> PageSource for MembersIter<H> {
    type Item = Member;
    type Cursor = UserId;

    fn page_size(&self) -> u16 {
        MEMBERS_PAGE_SIZE
    }

    async fn fetch_page(&mut self, cursor: Option<UserId>, limit: u16) -> Result<Vec<Member>> {
        self.http.as_ref().get_guild_members(self.guild_id, Some(limit), cursor).await
    }

    fn cursor_of(member: &Member) -> UserId {
        member.user.id
    }
}

/// The guilds of the current user, in ascending id order, walked with the `after` cursor.
pub struct GuildsIter<H: AsRef<Http>> {
    http: H,
}

impl<H: AsRef<Http>> GuildsIter<H> {
    pub fn new(http: H) -> Self {
        Self {
            http,
        }
    }
}

#[async_trait]
impl<H: AsRef<Http> + Send + Sync> PageSource for GuildsIter<H> {
    type Item = GuildInfo;
    type Cursor = GuildId;

    fn page_size(&self) -> u16 {
        GUILDS_PAGE_SIZE
    }

    async fn fetch_page(&mut self, cursor: Option<GuildId>, limit: u16) -> Result<Vec<GuildInfo>> {
        self.http.as_ref().get_guilds(cursor.map(GuildPagination::After), Some(limit)).await
    }

    fn cursor_of(guild: &GuildInfo) -> GuildId {
        guild.id
    }
}

/// The bans of a guild, in ascending user id order, walked with the `after` cursor.
pub struct BansIter<H: AsRef<Http>> {
    http: H,
    guild_id: GuildId,
}

impl<H: AsRef<Http>> BansIter<H> {
    pub fn new(http: H, guild_id: GuildId) -> Self {
        Self {
            http,
            guild_id,
        }
    }
}

#[async_trait]
impl<H: AsRef<Http> + Send + Sync> PageSource for BansIter<H> {
    type Item = Ban;
    type Cursor = UserId;

    fn page_size(&self) -> u16 {
        BANS_PAGE_SIZE
    }

    async fn fetch_page(&mut self, cursor: Option<UserId>, limit: u16) -> Result<Vec<Ban>> {
        self.http.as_ref().get_bans(self.guild_id, cursor, Some(limit)).await
    }

    fn cursor_of(ban: &Ban) -> UserId {
        ban.user.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Serves the ids `1..=total` in ascending order and counts requests.
    struct Numbers {
        total: u64,
        page_size: u16,
        requests: Vec<(Option<u64>, u16)>,
    }

    #[async_trait]
    impl PageSource for Numbers {
        type Item = u64;
        type Cursor = u64;

        fn page_size(&self) -> u16 {
            self.page_size
        }

        async fn fetch_page(&mut self, cursor: Option<u64>, limit: u16) -> Result<Vec<u64>> {
            self.requests.push((cursor, limit));

            let start = cursor.unwrap_or(0) + 1;
            Ok((start..=self.total).take(usize::from(limit)).collect())
        }

        fn cursor_of(item: &u64) -> u64 {
            *item
        }
    }

    fn numbers(total: u64, page_size: u16) -> Paginator<Numbers> {
        Paginator::new(Numbers {
            total,
            page_size,
            requests: Vec::new(),
        })
    }

    #[tokio::test]
    async fn short_page_ends_the_walk() {
        let mut paginator = numbers(25, 10);
        let mut pages = Vec::new();

        while let Some(page) = paginator.next_page().await.unwrap() {
            pages.push(page.len());
        }

        assert_eq!(pages, [10, 10, 5]);
        assert_eq!(paginator.source.requests, [(None, 10), (Some(10), 10), (Some(20), 10)]);

        assert!(paginator.next_page().await.unwrap().is_none());
        assert_eq!(paginator.source.requests.len(), 3);
    }

    #[tokio::test]
    async fn full_last_page_costs_one_empty_request() {
        let mut paginator = numbers(20, 10);
        let mut items = Vec::new();

        while let Some(item) = paginator.next().await {
            items.push(item.unwrap());
        }

        assert_eq!(items, (1..=20).collect::<Vec<_>>());
        assert_eq!(paginator.source.requests.len(), 3);
        assert!(paginator.is_exhausted());
    }

    #[tokio::test]
    async fn cap_requests_a_partial_last_page() {
        let mut paginator = numbers(100, 10).limit(25);
        let mut total = 0;

        while let Some(page) = paginator.next_page().await.unwrap() {
            total += page.len();
        }

        assert_eq!(total, 25);
        assert_eq!(paginator.source.requests, [(None, 10), (Some(10), 10), (Some(20), 5)]);
    }

    #[tokio::test]
    async fn stream_yields_every_item_from_the_cursor() {
        let items: Vec<u64> = numbers(12, 5)
            .starting_from(4)
            .stream()
            .map(|item| item.unwrap())
            .collect()
            .await;

        assert_eq!(items, (5..=12).collect::<Vec<_>>());
    }
}
