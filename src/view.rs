//! paginated, filterable view over a schedule for table display
use serde::Serialize;

use crate::types::{Installment, InstallmentStatus};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct ScheduleView<'a> {
    installments: &'a [Installment],
    status_filter: Option<InstallmentStatus>,
    page_size: usize,
}

/// one page of a schedule view, numbered from 1
#[derive(Debug, Serialize)]
pub struct Page<'a> {
    pub items: Vec<&'a Installment>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<'a> ScheduleView<'a> {
    pub fn new(installments: &'a [Installment]) -> Self {
        Self {
            installments,
            status_filter: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_status(mut self, status: Option<InstallmentStatus>) -> Self {
        self.status_filter = status;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn filtered(&self) -> Vec<&'a Installment> {
        self.installments
            .iter()
            .filter(|i| self.status_filter.map_or(true, |s| i.status == s))
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size)
    }

    /// pages past the end come back empty
    pub fn page(&self, page: usize) -> Page<'a> {
        let filtered = self.filtered();
        let total_items = filtered.len();
        let page = page.max(1);

        let items = filtered
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect();

        Page {
            items,
            page,
            page_size: self.page_size,
            total_pages: total_items.div_ceil(self.page_size),
            total_items,
        }
    }
}
