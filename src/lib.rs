//
// simhooks
//
// This file is part of simhooks.
//
// simhooks is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// simhooks is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with simhooks. If not, see <http://www.gnu.org/licenses/>.
//
// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later

//! Special function hooks for instruction-set simulators.
//!
//! The generated decode/execute loop of a simulator calls into this crate for
//! events it does not model itself: load-reserved/store-conditional
//! reservations, floating-point square roots and rounding, and a set of
//! extension points ([`hooks::SpecialFunctions`]) for prefetches, exceptions,
//! coprocessor transfers, fences and idle waits.
//!
//! All mutable state lives in a [`hart::Hart`], one per simulated hardware
//! thread.

pub mod address;
pub mod fpu;
pub mod hart;
pub mod hooks;
pub mod replay;
pub mod reservation;
pub mod tracing;

pub use address::Address;
pub use hart::Hart;
