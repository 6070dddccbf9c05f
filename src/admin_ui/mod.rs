//! Admin panel: declarative table descriptors rendered against the `/admin` endpoints.

mod client;
mod descriptor;
mod entities;
mod factory;

pub use client::{AdminClient, ClientError};
pub use descriptor::{ColumnSet, EntityDescriptor, Table};
pub use entities::*;
pub use factory::{EntityFactory, EntityHandle};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn navigation_lists_every_table_once() {
        let nav = descriptors();
        assert_eq!(nav.len(), 9);
        let urls: HashSet<_> = nav.iter().map(|(_, url)| *url).collect();
        assert_eq!(urls.len(), nav.len());
        assert!(nav.contains(&("Email verification", "/admin/entity/authEmail")));
    }

    #[test]
    fn admin_ui_route_and_backend_route_are_independent() {
        let email = email_entity();
        assert_eq!(email.base_url, "/admin/entity/authEmail");
        assert_eq!(email.be_url, "/admin/email");
        let phone = phone_entity();
        assert_eq!(phone.be_url, "/admin/phone");
    }

    #[test]
    fn dummy_rows_render_with_user_email() {
        let handle = EntityFactory::get_entity(email_entity(), AdminClient::new("http://localhost:3000"));
        let table = handle.dummy_table().unwrap();
        assert_eq!(table.header[1], "user");
        assert_eq!(table.rows[0][1], "dummy@email.com");
        assert_eq!(table.rows[0][4], "false");
    }
}
