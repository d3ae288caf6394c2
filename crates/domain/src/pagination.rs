//! Pagination value types.
//!
//! A [`PageRequest`] is resolved against the total number of matching rows
//! into a [`PageWindow`] (offset/limit for the store), and the fetched rows
//! are wrapped in a [`Page`] for rendering. Page 1 of an empty listing is
//! always valid; any other page past the end is rejected.

use std::str::FromStr;

use serde::Serialize;

use crate::error::{InvalidPageError, ValidationError};

/// Which page the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    /// 1-based page index.
    Number(u64),
    /// The last page, whatever its index.
    Last,
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::Number(1)
    }
}

impl FromStr for PageNumber {
    type Err = InvalidPageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "last" {
            return Ok(Self::Last);
        }
        let n: i64 = s
            .parse()
            .map_err(|_| InvalidPageError::NotANumber(s.to_string()))?;
        match u64::try_from(n) {
            Ok(n) if n >= 1 => Ok(Self::Number(n)),
            _ => Err(InvalidPageError::LessThanOne),
        }
    }
}

/// A page number paired with a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: PageNumber,
    size: u64,
}

/// Offset and limit for the store, plus the resolved page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub offset: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Build a request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroPageSize`] when `size` is zero.
    pub fn new(number: PageNumber, size: u64) -> Result<Self, ValidationError> {
        if size == 0 {
            return Err(ValidationError::ZeroPageSize);
        }
        Ok(Self { number, size })
    }

    /// Resolve against `total` matching rows.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPageError::Empty`] when the page lies past the last one.
    pub fn resolve(&self, total: u64) -> Result<PageWindow, InvalidPageError> {
        let last = num_pages(total, self.size);
        let number = match self.number {
            PageNumber::Last => last,
            PageNumber::Number(n) if n <= last => n,
            PageNumber::Number(n) => {
                return Err(InvalidPageError::Empty { requested: n, last });
            }
        };
        Ok(PageWindow {
            number,
            offset: (number - 1) * self.size,
            limit: self.size,
        })
    }
}

fn num_pages(total: u64, size: u64) -> u64 {
    total.div_ceil(size).max(1)
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total: u64,
}

impl<T> Page<T> {
    /// Wrap `items` fetched for `window` out of `total` rows.
    #[must_use]
    pub fn new(items: Vec<T>, window: PageWindow, total: u64) -> Self {
        Self {
            items,
            number: window.number,
            size: window.limit,
            total,
        }
    }

    #[must_use]
    pub fn num_pages(&self) -> u64 {
        num_pages(self.total, self.size)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub fn is_paginated(&self) -> bool {
        self.num_pages() > 1
    }

    #[must_use]
    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then_some(self.number + 1)
    }

    #[must_use]
    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then_some(self.number - 1)
    }

    /// Transform the items while keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total: self.total,
        }
    }
}
