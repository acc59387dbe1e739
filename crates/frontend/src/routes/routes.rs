use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::domain::a001_category::ui::list::CategoryList;
use crate::domain::a002_product::ui::list::ProductList;
use crate::domain::a003_purchase::ui::list::PurchaseList;
use crate::domain::a004_sale::ui::list::SaleList;
use crate::layout::Shell;
use crate::system::roles::ui::list::RolesList;
use crate::system::users::ui::list::UsersList;

// Paths match `contracts::system::menu::MENU_MODULES`.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <div class="page">"Página no encontrada"</div> }>
                    <Route path=path!("/") view=|| view! { <Redirect path="/categorias" /> } />
                    <Route path=path!("/categorias") view=CategoryList />
                    <Route path=path!("/productos") view=ProductList />
                    <Route path=path!("/compras") view=PurchaseList />
                    <Route path=path!("/ventas") view=SaleList />
                    <Route path=path!("/roles") view=RolesList />
                    <Route path=path!("/usuarios") view=UsersList />
                </Routes>
            </Shell>
        </Router>
    }
}
