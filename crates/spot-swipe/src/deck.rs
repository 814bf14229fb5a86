//! A queue of suggestion cards shown one at a time through a controller.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::controller::SwipeController;

/// Anything that can sit on a swipe deck.
pub trait DeckItem {
    type Id: Clone + PartialEq + fmt::Debug + 'static;

    fn id(&self) -> Self::Id;
}

struct DeckState<T> {
    upcoming: VecDeque<T>,
    current: Option<T>,
    saved: Vec<T>,
    skipped: usize,
}

impl<T: DeckItem + Clone> DeckState<T> {
    fn advance(&mut self) -> Option<T::Id> {
        self.current = self.upcoming.pop_front();
        self.current.as_ref().map(T::id)
    }

    fn save(&mut self, id: &T::Id) {
        let Some(current) = self.current.as_ref().filter(|item| item.id() == *id) else {
            log::debug!("select for {id:?} does not match the current card");
            return;
        };
        if self.saved.iter().any(|item| item.id() == *id) {
            return;
        }
        self.saved.push(current.clone());
    }
}

/// Owns the suggestion queue and rebinds its controller as cards resolve.
///
/// Skip discards the current card and binds the next one. Select saves the
/// current card (once per id) and leaves it on screen.
pub struct SwipeDeck<T: DeckItem + Clone + 'static> {
    controller: SwipeController<T::Id>,
    state: Rc<RefCell<DeckState<T>>>,
}

impl<T: DeckItem + Clone + 'static> SwipeDeck<T> {
    pub fn new(controller: SwipeController<T::Id>, items: impl IntoIterator<Item = T>) -> Self {
        let state = Rc::new(RefCell::new(DeckState {
            upcoming: items.into_iter().collect(),
            current: None,
            saved: Vec::new(),
            skipped: 0,
        }));

        {
            let deck = Rc::downgrade(&state);
            let weak_controller = controller.downgrade();
            controller.set_on_skip(move || {
                let Some(state) = deck.upgrade() else {
                    return;
                };
                let next = {
                    let mut state = state.borrow_mut();
                    state.skipped += 1;
                    state.advance()
                };
                if let Some(controller) = weak_controller.upgrade() {
                    match next {
                        Some(id) => controller.bind(id),
                        None => {
                            log::info!("suggestion deck exhausted");
                            controller.unbind();
                        }
                    }
                }
            });
        }
        {
            let deck: Weak<RefCell<DeckState<T>>> = Rc::downgrade(&state);
            controller.set_on_select(move |id| {
                if let Some(state) = deck.upgrade() {
                    state.borrow_mut().save(&id);
                }
            });
        }

        let first = state.borrow_mut().advance();
        match first {
            Some(id) => controller.bind(id),
            None => controller.unbind(),
        }
        Self { controller, state }
    }

    pub fn controller(&self) -> &SwipeController<T::Id> {
        &self.controller
    }

    pub fn current(&self) -> Option<T> {
        self.state.borrow().current.clone()
    }

    pub fn saved(&self) -> Vec<T> {
        self.state.borrow().saved.clone()
    }

    /// Cards still waiting behind the current one.
    pub fn remaining(&self) -> usize {
        self.state.borrow().upcoming.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.state.borrow().skipped
    }

    pub fn is_exhausted(&self) -> bool {
        let state = self.state.borrow();
        state.current.is_none() && state.upcoming.is_empty()
    }

    /// Appends a card. An exhausted deck shows it straight away.
    pub fn push(&self, item: T) {
        let bind = {
            let mut state = self.state.borrow_mut();
            state.upcoming.push_back(item);
            if state.current.is_none() {
                state.advance()
            } else {
                None
            }
        };
        if let Some(id) = bind {
            self.controller.bind(id);
        }
    }
}
