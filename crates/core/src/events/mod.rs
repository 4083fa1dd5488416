// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Push delivery of state changes to collaborators
//!
//! - `EventBus` - Route events to matching subscribers
//! - `EventPattern` - Pattern matching on event names (`upload:*`, `stage:**`)

mod bus;
mod subscription;

pub use bus::{EventBus, EventReceiver, EventSender};
pub use subscription::{EventPattern, SubscriberId, Subscription};
