//! `furnish address`

use clap::{Args, Subcommand};
use furnish_core::{AddressId, AddressUpdate, NewAddress};
use furnish_storefront::{AppError, AppState, Result};
use tracing::info;

use super::print_json;

#[derive(Subcommand)]
pub enum AddressAction {
    /// List saved addresses
    List,
    /// Save a new address
    Add {
        #[arg(long)]
        label: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        postal_code: String,
        /// Make this the default address
        #[arg(long)]
        default: bool,
    },
    /// Change fields of a saved address
    Update {
        id: String,
        #[command(flatten)]
        fields: UpdateFields,
    },
    /// Delete a saved address
    Remove { id: String },
    /// Make an address the default
    Default { id: String },
}

#[derive(Args)]
pub struct UpdateFields {
    #[arg(long)]
    label: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    postal_code: Option<String>,
    #[arg(long)]
    default: Option<bool>,
}

impl From<UpdateFields> for AddressUpdate {
    fn from(fields: UpdateFields) -> Self {
        Self {
            label: fields.label,
            name: fields.name,
            phone: fields.phone,
            address: fields.address,
            city: fields.city,
            postal_code: fields.postal_code,
            is_default: fields.default,
        }
    }
}

pub fn run(state: &AppState, action: AddressAction) -> Result<()> {
    let mut book = state.addresses()?;

    match action {
        AddressAction::List => print_json(book.state().addresses()),
        AddressAction::Add {
            label,
            name,
            phone,
            address,
            city,
            postal_code,
            default,
        } => {
            let saved = book.add_address(NewAddress {
                label,
                name,
                phone,
                address,
                city,
                postal_code,
                is_default: default,
            })?;
            info!(id = %saved.id, is_default = saved.is_default, "Address saved");
            print_json(&saved);
        }
        AddressAction::Update { id, fields } => {
            let id = known_id(&book, id)?;
            book.update_address(&id, &fields.into())?;
        }
        AddressAction::Remove { id } => {
            let id = known_id(&book, id)?;
            book.remove_address(&id)?;
        }
        AddressAction::Default { id } => {
            let id = known_id(&book, id)?;
            book.set_default_address(&id)?;
        }
    }

    Ok(())
}

/// The store ignores unknown ids; the CLI reports them instead.
fn known_id(book: &furnish_storefront::stores::AddressStore, id: String) -> Result<AddressId> {
    let id = AddressId::new(id);
    if book.state().get(&id).is_none() {
        return Err(AppError::NotFound(format!("address {id}")));
    }
    Ok(id)
}
