pub mod calculation;
pub mod graphql;
pub mod page;
pub mod schema;
pub mod user;

pub use calculation::{
    Calculation, CalculationData, CalculationRevision, CreateStatementInput, Engine, Revision,
    RevisionNode, SENTINEL_REVISION, Statement,
};
pub use graphql::{ApiError, GraphQlRequest, GraphQlResponse};
pub use page::{
    AddPageNodeInput, CalculationRef, CreatePageInput, Page, PageContent, PageNodePlacement,
    PageSummary, PutPageContentInput,
};
pub use schema::{FieldDescription, TypeDescription, TypeRef};
pub use user::CurrentUser;
