//! Generic list controller.
//!
//! One state machine drives every list screen (products, collections,
//! catalogues, catalogue membership, grouped browsing). It owns the
//! committed query, the fetched page and the loading flags, and emits
//! [`ListCmd`]s for the client to execute; fetch results come back as
//! [`ListMsg::FetchArrived`] carrying the ticket of the request that
//! produced them.
//!
//! Tickets are how stale responses are kept off the screen: every
//! scheduled fetch bumps the generation, and a response whose ticket no
//! longer matches the current generation is dropped wholesale. Without
//! this, a slow response for an old filter could overwrite the rows of a
//! newer one.

use crate::models::Id;
use crate::notify::Notification;
use crate::query::{ListParams, ListQuery};

/// Identifies the query generation a fetch was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// One page of list results plus the server's total count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListMsg<T> {
    SearchChanged(String),
    CategoryChanged(String),
    PageRequested(u32),
    RefreshRequested,
    FetchArrived(FetchTicket, Result<Page<T>, String>),
    /// Issued only after the user confirmed the blocking prompt;
    /// a declined prompt never produces a message.
    DeleteRequested(Id),
    DeleteFinished(Result<(), String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListCmd {
    Fetch(FetchTicket, ListParams),
    Delete(Id),
    Notify(Notification),
}

#[derive(Debug, Clone)]
pub struct ListState<T> {
    noun: &'static str,
    query: ListQuery,
    rows: Vec<T>,
    total: u64,
    loading: bool,
    deleting: bool,
    generation: u64,
}

impl<T> ListState<T> {
    /// `noun` is the singular resource name used in notification texts.
    pub fn new(noun: &'static str) -> Self {
        ListState {
            noun,
            query: ListQuery::default(),
            rows: Vec::new(),
            total: 0,
            loading: false,
            deleting: false,
            generation: 0,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn has_prev_page(&self) -> bool {
        self.query.page() > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.query.has_next_page(self.total)
    }

    pub fn update(&mut self, msg: ListMsg<T>) -> Vec<ListCmd> {
        match msg {
            ListMsg::SearchChanged(search) => {
                if self.query.set_search(search) {
                    vec![self.schedule_fetch()]
                } else {
                    Vec::new()
                }
            }

            ListMsg::CategoryChanged(category) => {
                if self.query.set_category(category) {
                    vec![self.schedule_fetch()]
                } else {
                    Vec::new()
                }
            }

            ListMsg::PageRequested(page) => {
                if self.query.set_page(page, self.total) {
                    vec![self.schedule_fetch()]
                } else {
                    Vec::new()
                }
            }

            ListMsg::RefreshRequested => vec![self.schedule_fetch()],

            ListMsg::FetchArrived(ticket, result) => {
                if ticket.0 != self.generation {
                    // Superseded by a newer query; leave the screen alone.
                    return Vec::new();
                }
                self.loading = false;
                match result {
                    Ok(page) => {
                        self.rows = page.rows;
                        self.total = page.total;
                        Vec::new()
                    }
                    Err(text) => vec![ListCmd::Notify(Notification::error(
                        format!("Error fetching {}s", self.noun),
                        text,
                    ))],
                }
            }

            ListMsg::DeleteRequested(id) => {
                self.deleting = true;
                vec![ListCmd::Delete(id)]
            }

            ListMsg::DeleteFinished(result) => {
                self.deleting = false;
                match result {
                    Ok(()) => vec![
                        ListCmd::Notify(Notification::success(
                            "Deleted!",
                            format!("The {} has been deleted.", self.noun),
                        )),
                        self.schedule_fetch(),
                    ],
                    Err(text) => vec![ListCmd::Notify(Notification::error(
                        format!("Failed to delete {}.", self.noun),
                        text,
                    ))],
                }
            }
        }
    }

    fn schedule_fetch(&mut self) -> ListCmd {
        self.generation += 1;
        self.loading = true;
        ListCmd::Fetch(FetchTicket(self.generation), self.query.params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PAGE_SIZE;

    #[derive(Debug, Clone, PartialEq)]
    struct Rec {
        id: Id,
        name: String,
    }

    fn rec(id: Id, name: &str) -> Rec {
        Rec {
            id,
            name: name.into(),
        }
    }

    /// In-memory stand-in for the REST backend: answers fetch commands
    /// from its record store and tracks every call it receives.
    #[derive(Default)]
    struct FakeBackend {
        records: Vec<Rec>,
        list_calls: Vec<ListParams>,
        delete_calls: Vec<Id>,
    }

    impl FakeBackend {
        /// Executes commands and returns the messages the client glue
        /// would feed back into the controller.
        fn execute(&mut self, cmds: Vec<ListCmd>) -> Vec<ListMsg<Rec>> {
            let mut replies = Vec::new();
            for cmd in cmds {
                match cmd {
                    ListCmd::Fetch(ticket, params) => {
                        self.list_calls.push(params.clone());
                        let matching: Vec<Rec> = self
                            .records
                            .iter()
                            .filter(|r| r.name.contains(&params.search))
                            .cloned()
                            .collect();
                        let total = matching.len() as u64;
                        let rows = matching
                            .into_iter()
                            .skip(params.offset as usize)
                            .take(params.limit as usize)
                            .collect();
                        replies.push(ListMsg::FetchArrived(ticket, Ok(Page { rows, total })));
                    }
                    ListCmd::Delete(id) => {
                        self.delete_calls.push(id);
                        self.records.retain(|r| r.id != id);
                        replies.push(ListMsg::DeleteFinished(Ok(())));
                    }
                    ListCmd::Notify(_) => {}
                }
            }
            replies
        }
    }

    fn drive(state: &mut ListState<Rec>, backend: &mut FakeBackend, msg: ListMsg<Rec>) {
        let mut pending = state.update(msg);
        while !pending.is_empty() {
            let replies = backend.execute(pending);
            pending = replies
                .into_iter()
                .flat_map(|reply| state.update(reply))
                .collect();
        }
    }

    #[test]
    fn initial_refresh_fetches_first_page() {
        let mut state = ListState::<Rec>::new("product");
        let cmds = state.update(ListMsg::RefreshRequested);

        assert!(state.is_loading());
        match &cmds[..] {
            [ListCmd::Fetch(_, params)] => {
                assert_eq!(params.offset, 0);
                assert_eq!(params.limit, PAGE_SIZE);
            }
            other => panic!("expected a single fetch, got {:?}", other),
        }
    }

    #[test]
    fn search_on_page_three_fetches_offset_zero() {
        let mut state = ListState::<Rec>::new("product");
        let mut backend = FakeBackend::default();
        backend.records = (1..=35).map(|i| rec(i, &format!("item {}", i))).collect();

        drive(&mut state, &mut backend, ListMsg::RefreshRequested);
        drive(&mut state, &mut backend, ListMsg::PageRequested(3));
        assert_eq!(backend.list_calls.last().unwrap().offset, 20);

        drive(&mut state, &mut backend, ListMsg::SearchChanged("item 1".into()));
        let last = backend.list_calls.last().unwrap();
        assert_eq!(last.offset, 0);
        assert_eq!(last.search, "item 1");
    }

    #[test]
    fn page_request_past_total_is_a_no_op() {
        let mut state = ListState::<Rec>::new("product");
        let mut backend = FakeBackend::default();
        backend.records = (1..=10).map(|i| rec(i, "r")).collect();

        drive(&mut state, &mut backend, ListMsg::RefreshRequested);
        let calls_before = backend.list_calls.len();

        assert!(state.update(ListMsg::PageRequested(2)).is_empty());
        assert!(state.update(ListMsg::PageRequested(0)).is_empty());
        assert_eq!(backend.list_calls.len(), calls_before);
        assert_eq!(state.query().page(), 1);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = ListState::<Rec>::new("product");

        let first = state.update(ListMsg::SearchChanged("old".into()));
        let old_ticket = match &first[..] {
            [ListCmd::Fetch(ticket, _)] => *ticket,
            other => panic!("expected a fetch, got {:?}", other),
        };
        let second = state.update(ListMsg::SearchChanged("new".into()));
        let new_ticket = match &second[..] {
            [ListCmd::Fetch(ticket, _)] => *ticket,
            other => panic!("expected a fetch, got {:?}", other),
        };

        // Old response arrives after the newer query was committed.
        state.update(ListMsg::FetchArrived(
            old_ticket,
            Ok(Page {
                rows: vec![rec(1, "stale")],
                total: 1,
            }),
        ));
        assert!(state.rows().is_empty());
        assert!(state.is_loading());

        state.update(ListMsg::FetchArrived(
            new_ticket,
            Ok(Page {
                rows: vec![rec(2, "fresh")],
                total: 1,
            }),
        ));
        assert_eq!(state.rows(), &[rec(2, "fresh")]);
        assert!(!state.is_loading());
    }

    #[test]
    fn fetch_failure_keeps_previous_rows_and_notifies() {
        let mut state = ListState::<Rec>::new("product");
        let mut backend = FakeBackend::default();
        backend.records = vec![rec(1, "kept")];
        drive(&mut state, &mut backend, ListMsg::RefreshRequested);

        let cmds = state.update(ListMsg::RefreshRequested);
        let ticket = match &cmds[..] {
            [ListCmd::Fetch(ticket, _)] => *ticket,
            other => panic!("expected a fetch, got {:?}", other),
        };
        let cmds = state.update(ListMsg::FetchArrived(ticket, Err("boom".into())));

        assert_eq!(state.rows(), &[rec(1, "kept")]);
        assert!(!state.is_loading());
        match &cmds[..] {
            [ListCmd::Notify(n)] => assert_eq!(n.text, "boom"),
            other => panic!("expected a notification, got {:?}", other),
        }
    }

    #[test]
    fn confirmed_delete_issues_one_request_then_one_refresh() {
        let mut state = ListState::<Rec>::new("product");
        let mut backend = FakeBackend::default();
        backend.records = vec![rec(1, "a"), rec(2, "b")];
        drive(&mut state, &mut backend, ListMsg::RefreshRequested);
        let fetches_before = backend.list_calls.len();

        drive(&mut state, &mut backend, ListMsg::DeleteRequested(1));

        assert_eq!(backend.delete_calls, vec![1]);
        assert_eq!(backend.list_calls.len(), fetches_before + 1);
        assert_eq!(state.rows(), &[rec(2, "b")]);
        assert!(!state.is_deleting());
    }

    #[test]
    fn declined_delete_never_reaches_the_backend() {
        // A declined confirmation produces no message at all, so the
        // controller state and the backend are untouched by construction.
        let mut state = ListState::<Rec>::new("product");
        let mut backend = FakeBackend::default();
        backend.records = vec![rec(1, "a")];
        drive(&mut state, &mut backend, ListMsg::RefreshRequested);

        assert!(backend.delete_calls.is_empty());
        assert_eq!(state.rows(), &[rec(1, "a")]);
    }

    #[test]
    fn failed_delete_keeps_the_record_in_place() {
        let mut state = ListState::<Rec>::new("product");
        let mut backend = FakeBackend::default();
        backend.records = vec![rec(1, "a")];
        drive(&mut state, &mut backend, ListMsg::RefreshRequested);

        let cmds = state.update(ListMsg::DeleteRequested(1));
        assert_eq!(cmds, vec![ListCmd::Delete(1)]);
        assert!(state.is_deleting());

        let cmds = state.update(ListMsg::DeleteFinished(Err("denied".into())));
        assert!(!state.is_deleting());
        assert_eq!(state.rows(), &[rec(1, "a")]);
        match &cmds[..] {
            [ListCmd::Notify(n)] => assert_eq!(n.text, "denied"),
            other => panic!("expected a notification, got {:?}", other),
        }
    }

    #[test]
    fn created_record_appears_after_refresh() {
        let mut state = ListState::<Rec>::new("product");
        let mut backend = FakeBackend::default();
        drive(&mut state, &mut backend, ListMsg::RefreshRequested);
        assert!(state.rows().is_empty());

        // The form modal's success path: backend gained a record, then
        // the caller-supplied refresh runs.
        backend.records.push(rec(7, "new bat"));
        drive(&mut state, &mut backend, ListMsg::RefreshRequested);

        assert_eq!(state.rows(), &[rec(7, "new bat")]);
        assert_eq!(state.total(), 1);
    }
}
