use no_std_compat::cell::{Cell, RefCell};
use no_std_compat::cmp::Ordering::Equal;

/// Messages which can wait in the queue at the same time
pub const QUEUE_SIZE: usize = 8;

#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct Msg<T: Sized> {
    pub when: u32,
    pub order: u32,
    pub payload: T,
}

/// Event dispatch thread: a queue of delayed messages and the virtual time in milliseconds
pub struct EDT<T> {
    now: Cell<u32>,
    queue: RefCell<[Option<Msg<T>>; QUEUE_SIZE]>,
}

impl<T: Copy> EDT<T> {
    pub fn create() -> EDT<T> {
        EDT {
            now: Cell::new(0),
            queue: RefCell::new([None; QUEUE_SIZE]),
        }
    }
}

pub enum Event<T> {
    Execute { msg: T },
    Wait { ms: u32 },
    Halt,
}

impl<T: Copy> EDT<T> {
    pub fn now(&self) -> u32 {
        self.now.get()
    }

    pub fn poll(&self) -> Event<T> {
        let head_option = self.peek_head();

        if let Some((position, head)) = head_option {
            let to_wait = self.due_in(&head);
            if to_wait > 0 {
                // the caller sleeps, then it is due
                self.now.set(head.when);
                Event::Wait {
                    ms: to_wait as u32,
                }
            } else {
                self.queue.borrow_mut()[position] = None;
                Event::Execute { msg: head.payload }
            }
        } else {
            Event::Halt
        }
    }

    /// Advances the time by the given value and feeds messages to the handler
    pub fn advance_time_by(&self, time: u32, handler: &dyn Fn(T)) {
        let start = self.now.get();
        let target = start.wrapping_add(time);
        loop {
            match self.peek_head() {
                Some((_, head))
                    if self.due_in(&head) <= 0 || head.when.wrapping_sub(start) <= time =>
                {
                    if let Event::Execute { msg } = self.poll() {
                        handler(msg);
                    }
                }
                _ => {
                    self.now.set(target);
                    break;
                }
            }
        }
    }

    /// Milliseconds until the message is due, negative when overdue.
    /// The clock wraps around, so this is the distance from now, not a comparison of `when`.
    fn due_in(&self, msg: &Msg<T>) -> i32 {
        msg.when.wrapping_sub(self.now.get()) as i32
    }

    fn peek_head(&self) -> Option<(usize, Msg<T>)> {
        self.queue
            .borrow()
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| slot.map(|msg| (position, msg)))
            .min_by(|(_, lhs), (_, rhs)| {
                let by_when = self.due_in(lhs).cmp(&self.due_in(rhs));
                match by_when {
                    Equal => lhs.order.cmp(&rhs.order),
                    _ => by_when,
                }
            })
    }

    pub fn schedule(&self, delay: u32, payload: T) {
        let when = self.now.get().wrapping_add(delay);

        let order = self
            .queue
            .borrow()
            .iter()
            .flatten()
            .filter(|message| message.when == when)
            .map(|it| it.order + 1)
            .max()
            .unwrap_or(0);

        let mut queue = self.queue.borrow_mut();
        match queue.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(Msg {
                    when,
                    order,
                    payload,
                })
            }
            None => log::error!("event queue is full, dropping message due at {}", when),
        }
    }

    pub fn remove<F>(&self, mut predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        for slot in self.queue.borrow_mut().iter_mut() {
            if slot.map_or(false, |msg| predicate(&msg.payload)) {
                *slot = None;
            }
        }
    }

    /// Clearing the queue makes the next [EDT::poll] return [Event::Halt]
    pub fn exit(&self) {
        self.remove(|_| true);
    }

    pub fn queue_len(&self) -> usize {
        self.queue.borrow().iter().flatten().count()
    }
}
