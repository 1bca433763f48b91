use clap::{Parser, Subcommand};

use crate::models::{SortDirection, SortField};

#[derive(Parser)]
#[command(name = "userdesk")]
#[command(about = "Terminal client for a user-records REST service")]
#[command(version)]
pub struct Cli {
    /// Run a single command and exit instead of launching the TUI
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List users (paginated, sortable, searchable)
    List {
        /// Search text, matched by the backend
        #[arg(short, long, default_value = "")]
        search: String,

        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Rows per page
        #[arg(long, default_value = "10")]
        size: usize,

        /// Sort column (id, name, description, gender, country, dateOfBirth)
        #[arg(long, default_value = "id")]
        sort_by: String,

        /// Sort direction (asc, desc)
        #[arg(long, default_value = "asc")]
        sort_dir: String,
    },

    /// Show a single user as JSON
    Show {
        /// User identifier
        id: i64,
    },

    /// Delete a user
    Delete {
        /// User identifier
        id: i64,

        /// Confirm the deletion; without this flag nothing is deleted
        #[arg(long)]
        yes: bool,
    },
}

impl Commands {
    pub fn parse_sort_field(field: &str) -> Result<SortField, anyhow::Error> {
        match field {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "description" => Ok(SortField::Description),
            "gender" => Ok(SortField::Gender),
            "country" => Ok(SortField::Country),
            "dateOfBirth" | "dob" => Ok(SortField::DateOfBirth),
            other => Err(anyhow::anyhow!(
                "Unsupported sort column: {}. Supported: id, name, description, gender, country, dateOfBirth",
                other
            )),
        }
    }

    pub fn parse_sort_direction(dir: &str) -> Result<SortDirection, anyhow::Error> {
        match dir.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(anyhow::anyhow!(
                "Unsupported sort direction: {}. Supported: asc, desc",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_field() {
        assert_eq!(
            Commands::parse_sort_field("dateOfBirth").unwrap(),
            SortField::DateOfBirth
        );
        assert!(Commands::parse_sort_field("salary").is_err());
    }

    #[test]
    fn test_parse_sort_direction() {
        assert_eq!(
            Commands::parse_sort_direction("DESC").unwrap(),
            SortDirection::Descending
        );
        assert!(Commands::parse_sort_direction("sideways").is_err());
    }
}
