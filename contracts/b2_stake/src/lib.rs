#![no_std]
mod accumulator;
mod admin;
mod contract;
mod error;
mod events;
mod ledger;
mod queue;
mod registry;
mod storage;

#[cfg(test)]
mod tests;
