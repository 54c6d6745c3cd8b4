//! Query parameter types for API handlers.

use cinerate_core::error::CoreError;
use cinerate_core::movie::parse_release_year;
use cinerate_core::pagination::PageRequest;
use cinerate_db::models::movie::MovieFilter;
use serde::Deserialize;

use crate::error::AppError;

/// Query parameters for `GET /movies`.
///
/// `page` and `page_size` must be integers (a non-integer is rejected by the
/// extractor). `release_year` stays a string here so a non-numeric value can
/// be reported with its own message.
#[derive(Debug, Default, Deserialize)]
pub struct ListMoviesParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub title: Option<String>,
    pub release_year: Option<String>,
    pub genre: Option<String>,
}

impl ListMoviesParams {
    /// Pagination window; out-of-range values are a request error.
    pub fn page_request(&self) -> Result<PageRequest, AppError> {
        PageRequest::new(self.page, self.page_size).ok_or(AppError::InvalidRequest)
    }

    pub fn filter(&self) -> Result<MovieFilter, AppError> {
        let release_year = match self.release_year.as_deref() {
            Some(raw) => Some(parse_release_year(raw).ok_or_else(|| {
                AppError::Core(CoreError::Validation("Invalid release_year".into()))
            })?),
            None => None,
        };

        Ok(MovieFilter {
            title: self.title.clone(),
            release_year,
            genre: self.genre.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let page = ListMoviesParams::default().page_request().unwrap();
        assert_eq!((page.page, page.page_size), (1, 10));
    }

    #[test]
    fn out_of_range_paging_is_invalid_request() {
        let params = ListMoviesParams {
            page_size: Some(101),
            ..Default::default()
        };
        assert_matches!(params.page_request(), Err(AppError::InvalidRequest));

        let params = ListMoviesParams {
            page: Some(0),
            ..Default::default()
        };
        assert_matches!(params.page_request(), Err(AppError::InvalidRequest));
    }

    #[test]
    fn non_numeric_release_year_is_a_validation_error() {
        let params = ListMoviesParams {
            release_year: Some("20x0".into()),
            ..Default::default()
        };
        assert_matches!(
            params.filter(),
            Err(AppError::Core(CoreError::Validation(msg))) if msg == "Invalid release_year"
        );
    }

    #[test]
    fn numeric_release_year_becomes_exact_filter() {
        let params = ListMoviesParams {
            title: Some("dark".into()),
            release_year: Some("2008".into()),
            ..Default::default()
        };
        let filter = params.filter().unwrap();
        assert_eq!(filter.release_year, Some(2008));
        assert_eq!(filter.title.as_deref(), Some("dark"));
        assert_eq!(filter.genre, None);
    }
}
