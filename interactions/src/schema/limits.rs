/// Platform limits enforced while validating a command schema. The
/// defaults are the published platform numbers; embedders talking to a
/// proxy with different rules can pass their own.
#[derive(Clone, Copy, Debug)]
pub struct SchemaLimits {
    pub name_length: usize,
    pub description_length: usize,
    pub choice_name_length: usize,
    pub choice_value_length: usize,
    pub options_per_level: usize,
    pub choices_per_option: usize,
}

impl Default for SchemaLimits {
    fn default() -> Self {
        SchemaLimits {
            name_length: 32,
            description_length: 100,
            choice_name_length: 100,
            choice_value_length: 100,
            options_per_level: 25,
            choices_per_option: 25,
        }
    }
}
