#![cfg_attr(not(test), no_std)]
pub mod bounce;
pub mod bsp;
pub mod button;
pub mod control;
pub mod counter;
pub mod debounce;
pub mod edt;
pub mod game;
pub mod hal;
pub mod hold;
pub mod toggle;
