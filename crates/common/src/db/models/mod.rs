//! SeaORM entity models

mod publication;

pub use publication::{
    Entity as PublicationEntity,
    Model as Publication,
    ActiveModel as PublicationActiveModel,
    Column as PublicationColumn,
    PublicationInput,
    PLACEHOLDER_AUTHORS,
    PLACEHOLDER_SUMMARY,
    PLACEHOLDER_TYPE,
};
