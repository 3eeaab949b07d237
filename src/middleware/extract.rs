//! Request extractors whose rejections render as the failure envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::CopydeskError;

/// `axum::Json` with rejections mapped through `CopydeskError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(CopydeskError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(CopydeskError))]
pub struct AppQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(CopydeskError))]
pub struct AppPath<T>(pub T);
