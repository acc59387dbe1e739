use console_core::list::{list_body, ListBody, RowAction, RowActions};
use leptos::prelude::*;
use thaw::*;

use super::{ListColumns, RowExtra};
use crate::shared::icons::icon;

#[component]
pub fn EntityTable<S>(
    items: Signal<Vec<S>>,
    on_row: Callback<(S, RowAction)>,
    row_extra: Option<RowExtra<S>>,
) -> impl IntoView
where
    S: ListColumns,
{
    let headers = S::headers();
    // data columns + status + actions
    let column_count = (headers.len() + 2).to_string();

    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        {headers
                            .into_iter()
                            .map(|h| view! { <TableHeaderCell>{h}</TableHeaderCell> })
                            .collect_view()}
                        <TableHeaderCell>"Estado"</TableHeaderCell>
                        <TableHeaderCell>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let row_extra = row_extra.clone();
                        let column_count = column_count.clone();
                        items.with(|items| match list_body(items) {
                            ListBody::Empty => view! {
                                <TableRow>
                                    <TableCell attr:colspan=column_count>
                                        <div class="table__empty">"No hay registros"</div>
                                    </TableCell>
                                </TableRow>
                            }
                            .into_any(),
                            ListBody::Rows(rows) => rows
                                .into_iter()
                                .map(|row| entity_row(row.entity.clone(), row.actions, on_row, row_extra.clone()))
                                .collect_view()
                                .into_any(),
                        })
                    }}
                </TableBody>
            </Table>
        </div>
    }
}

fn entity_row<S: ListColumns>(
    entity: S,
    actions: RowActions,
    on_row: Callback<(S, RowAction)>,
    row_extra: Option<RowExtra<S>>,
) -> impl IntoView {
    let status = entity.status();
    let badge_class = if status.is_active() {
        "badge badge--success"
    } else {
        "badge badge--error"
    };

    let action_entity = entity.clone();
    let action_button = move |action: RowAction, icon_name: &'static str, title: &'static str| {
        let entity = action_entity.clone();
        view! {
            <Button
                appearance=ButtonAppearance::Subtle
                disabled=!actions.allows(action)
                on_click=move |_| on_row.run((entity.clone(), action))
                attr:title=title
            >
                {icon(icon_name)}
            </Button>
        }
    };

    let extra_button = row_extra.map(|extra| {
        let entity = entity.clone();
        view! {
            <Button
                appearance=ButtonAppearance::Subtle
                disabled=!actions.edit
                on_click=move |_| extra.on_click.run(entity.clone())
                attr:title=extra.title
            >
                {icon(extra.icon)}
            </Button>
        }
    });

    view! {
        <TableRow>
            {entity
                .cells()
                .into_iter()
                .map(|cell| view! {
                    <TableCell>
                        <TableCellLayout truncate=true>{cell}</TableCellLayout>
                    </TableCell>
                })
                .collect_view()}
            <TableCell>
                <TableCellLayout>
                    <span class=badge_class>{status.label()}</span>
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <div class="table__actions">
                    {action_button(RowAction::ToggleStatus, "toggle", if status.is_active() { "Desactivar" } else { "Activar" })}
                    {action_button(RowAction::View, "eye", "Ver")}
                    {action_button(RowAction::Edit, "edit", "Editar")}
                    {action_button(RowAction::Delete, "trash", "Eliminar")}
                    {extra_button}
                </div>
            </TableCell>
        </TableRow>
    }
}
