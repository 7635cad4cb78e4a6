use portico_interaction::registry::ModelInvocationRegistry;

/// Prints the registered model backends and which one is the default.
pub fn run() {
    let registry = ModelInvocationRegistry::bedrock_simulation();
    for (id, label) in registry.models() {
        let marker = if id == registry.default_model() {
            " (default)"
        } else {
            ""
        };
        println!("{id}  {label}{marker}");
    }
}
