//! Plain-text rendering of the view models.
//!
//! Output is written into any [`std::fmt::Write`] sink so the terminal shim can
//! print it and tests can inspect it.

use crate::ui::details::CountryDetails;
use crate::ui::viewmodel::{CountryRow, FilterDialogState, ListViewModel, SortDialogState};
use std::fmt::{self, Write};

/// Width of the name column.
const NAME_WIDTH: usize = 28;
/// Width of the capital column.
const CAPITAL_WIDTH: usize = 20;

/// Renders the list screen.
///
/// # Errors
///
/// Only fails if the sink does.
pub fn render_list(out: &mut impl Write, vm: &ListViewModel) -> fmt::Result {
    write!(out, "{} ({})", vm.header.title, vm.header.count)?;
    if !vm.header.criteria.is_empty() {
        write!(out, " [{}]", vm.header.criteria)?;
    }
    writeln!(out)?;

    if !vm.search_bar.query.is_empty() {
        writeln!(out, "search: {}", vm.search_bar.query)?;
    }

    if let Some(empty) = &vm.empty_state {
        return writeln!(out, "  {}", empty.message());
    }

    writeln!(out, "{:<NAME_WIDTH$} {:<CAPITAL_WIDTH$} {:>13}", "NAME", "CAPITAL", "POPULATION")?;
    for row in &vm.rows {
        writeln!(
            out,
            "{:<NAME_WIDTH$} {:<CAPITAL_WIDTH$} {:>13}",
            highlighted_name(row),
            row.capital,
            row.population
        )?;
    }
    Ok(())
}

/// Marks the matched part of the name with brackets, e.g. `[Fr]ance`.
fn highlighted_name(row: &CountryRow) -> String {
    let Some((start, end)) = row.highlight else {
        return row.name.clone();
    };

    let mut name = String::with_capacity(row.name.len() + 2);
    for (i, ch) in row.name.chars().enumerate() {
        if i == start {
            name.push('[');
        }
        name.push(ch);
        if i + 1 == end {
            name.push(']');
        }
    }
    name
}

/// Renders the detail screen.
///
/// # Errors
///
/// Only fails if the sink does.
pub fn render_details(out: &mut impl Write, details: &CountryDetails) -> fmt::Result {
    writeln!(out, "{}", details.name)?;
    writeln!(out, "  capital:    {}", details.capital)?;
    writeln!(out, "  subregion:  {}", details.subregion)?;
    writeln!(out, "  population: {}", details.population)?;
    writeln!(out, "  area:       {}", details.area)?;
    writeln!(out, "  languages:  {}", details.languages)?;
    writeln!(out, "  borders:    {}", details.border_names.join(", "))?;
    writeln!(out, "  flag:       {}", details.flag_url)?;
    if !details.flag_description.is_empty() {
        writeln!(out, "              {}", details.flag_description)?;
    }
    Ok(())
}

/// Renders the sort and filter dialog states.
///
/// # Errors
///
/// Only fails if the sink does.
pub fn render_dialogs(out: &mut impl Write, sort: &SortDialogState, filter: &FilterDialogState) -> fmt::Result {
    match sort.feature {
        Some(feature) => writeln!(
            out,
            "sort: {feature} {}",
            if sort.descending { "descending" } else { "ascending" }
        )?,
        None => writeln!(out, "sort: none")?,
    }

    writeln!(out, "subregions:")?;
    for option in &filter.options {
        let mark = if option.checked { 'x' } else { ' ' };
        writeln!(out, "  [{mark}] {}", option.subregion)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ListSnapshot;
    use crate::domain::Country;

    #[test]
    fn list_shows_rows_with_highlight() {
        let snapshot = ListSnapshot {
            countries: vec![Country::new("FRA", "France", "Western Europe", 67_000_000).with_capital(["Paris"])],
            search_query: "fr".to_string(),
            loaded: true,
            ..ListSnapshot::default()
        };

        let mut out = String::new();
        render_list(&mut out, &ListViewModel::from_snapshot(&snapshot)).unwrap();

        assert!(out.starts_with("European countries (1)\n"));
        assert!(out.contains("search: fr"));
        assert!(out.contains("[Fr]ance"));
        assert!(out.contains("Paris"));
    }

    #[test]
    fn list_shows_empty_state() {
        let mut out = String::new();
        render_list(&mut out, &ListViewModel::from_snapshot(&ListSnapshot::default())).unwrap();
        assert!(out.contains("Loading countries..."));
    }

    #[test]
    fn dialogs_mark_checked_subregions() {
        let sort = SortDialogState::from_active(None);
        let filter = FilterDialogState::new(vec!["Baltic".to_string()], None);

        let mut out = String::new();
        render_dialogs(&mut out, &sort, &filter).unwrap();
        assert_eq!(out, "sort: none\nsubregions:\n  [ ] Baltic\n");
    }
}
