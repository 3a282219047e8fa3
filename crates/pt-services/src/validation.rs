//! DTO validation helpers

use pt_core::error::ValidationErrors;
use validator::Validate;

/// Run the DTO's field rules
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), ValidationErrors> {
    dto.validate().map_err(ValidationErrors::from)
}

/// Run the field rules of every item, reporting failures as `field[index].name`
pub fn validate_each<T: Validate>(field: &str, items: &[T]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for (index, item) in items.iter().enumerate() {
        if let Err(item_errors) = validate_dto(item) {
            for (name, messages) in item_errors.errors {
                for message in messages {
                    errors.add(format!("{field}[{index}].{name}"), message);
                }
            }
        }
    }
    errors.into_result()
}
