use contracts::shared::query::QueryResult;
use leptos::prelude::*;

/// Plain tabular rendering of a query result
#[component]
pub fn ResultTable(result: QueryResult) -> impl IntoView {
    let columns = result.data.columns;
    let rows = result.data.rows;
    let empty = rows.is_empty();

    let header = columns
        .iter()
        .map(|c| view! { <th class="table__header-cell">{c.title().to_string()}</th> })
        .collect_view();

    let body = rows
        .iter()
        .map(|row| {
            let cells = columns
                .iter()
                .map(|c| view! { <td class="table__cell">{QueryResult::cell_text(row, &c.name)}</td> })
                .collect_view();
            view! { <tr class="table__row">{cells}</tr> }
        })
        .collect_view();

    view! {
        <div class="table-wrapper">
            <table class="table__data table--striped">
                <thead class="table__head">
                    <tr>{header}</tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
            {empty.then(|| view! { <div class="table__empty">"No rows"</div> })}
        </div>
    }
}
