// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entity types mirrored from the Wisssh backend.
//!
//! This module contains the cached representations of users, wishes and
//! wishlists, plus the small value types they are built from: Stars,
//! Currency, WishlistDate and ImageKind.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A registered user as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Friends are returned without an email address.
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image_extension: Option<String>,
    #[serde(default)]
    pub wishes: Vec<String>,
    #[serde(default)]
    pub wishlists: Vec<String>,
    /// Ids of wishlists this user was invited to.
    #[serde(default)]
    pub invites: Vec<String>,
}

/// Priority of a wish, from 0 to 3 stars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Stars(u8);

impl Stars {
    pub const MAX: u8 = 3;

    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::InvalidStars(value));
        }
        Ok(Stars(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Stars {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Stars::new(value)
    }
}

impl From<Stars> for u8 {
    fn from(stars: Stars) -> u8 {
        stars.0
    }
}

/// Currency a wish is priced in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Rouble,
    Dollar,
    Euro,
}

impl Currency {
    /// Returns the string representation used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Rouble => "rouble",
            Currency::Dollar => "dollar",
            Currency::Euro => "euro",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Rouble => "₽",
            Currency::Dollar => "$",
            Currency::Euro => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rouble" | "rub" => Ok(Currency::Rouble),
            "dollar" | "usd" => Ok(Currency::Dollar),
            "euro" | "eur" => Ok(Currency::Euro),
            _ => Err(Error::InvalidCurrency(s.to_string())),
        }
    }
}

/// Event date attached to a wishlist, stored as `[day, month, year]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistDate(pub u32, pub u32, pub i32);

impl WishlistDate {
    /// Creates a date, rejecting days that do not exist in the calendar.
    pub fn new(day: u32, month: u32, year: i32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|_| WishlistDate(day, month, year))
            .ok_or_else(|| Error::InvalidDate(format!("{:02}.{:02}.{}", day, month, year)))
    }

    pub fn day(&self) -> u32 {
        self.0
    }

    pub fn month(&self) -> u32 {
        self.1
    }

    pub fn year(&self) -> i32 {
        self.2
    }
}

impl fmt::Display for WishlistDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{}", self.0, self.1, self.2)
    }
}

impl FromStr for WishlistDate {
    type Err = Error;

    /// Parses `dd.mm.yyyy`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidDate(s.to_string());
        let mut parts = s.trim().split('.');
        let day = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let month = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let year = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        WishlistDate::new(day, month, year)
    }
}

/// A wish owned by `author`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wish {
    pub id: String,
    pub author: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// External shop link.
    #[serde(default)]
    pub external: String,
    #[serde(default)]
    pub image_extension: Option<String>,
    /// Cover aspect ratio (width / height).
    #[serde(rename = "imageAR", default = "default_aspect_ratio")]
    pub image_ar: f64,
    #[serde(default)]
    pub stars: Stars,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub in_wishlists: Vec<String>,
    #[serde(default)]
    pub reserved_by: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_modified_at: DateTime<Utc>,
}

fn default_aspect_ratio() -> f64 {
    1.0
}

/// A wishlist owned by `author`, shareable through its invitation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub id: String,
    pub author: String,
    pub invitation_code: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<WishlistDate>,
    #[serde(default)]
    pub wishes: Vec<String>,
}

/// Which image drive an image lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// User avatar.
    Avatar,
    /// Wish cover.
    Cover,
}

impl ImageKind {
    /// Drive name used in image endpoint paths.
    pub fn drive(&self) -> &'static str {
        match self {
            ImageKind::Avatar => "avatars",
            ImageKind::Cover => "covers",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageKind::Avatar => write!(f, "avatar"),
            ImageKind::Cover => write!(f, "cover"),
        }
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
