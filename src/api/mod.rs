//! Backend contracts and their HTTP implementation.

mod client;
mod models;

pub use client::{CitizenApi, HttpCitizenApi};
pub use models::{Application, BenefitAllocation, PagedResult, Profile, Scheme};
