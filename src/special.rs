//! Hand-authored translations for declarations the generic rules cannot
//! decompose, keyed by declaration name and consulted before the generic
//! path runs.

use crate::doc::doc_template;

/// A complete replacement translation for a declaration, when one exists.
pub fn override_for(name: &str, doc: Option<&str>) -> Option<String> {
    match name {
        // Nested anonymous unions and structs inside one declaration.
        "SDL_GamepadBinding" => Some(gamepad_binding(doc)),
        _ => None,
    }
}

/// Post-translation fixups for individual members of otherwise regular
/// declarations.
pub fn patch_fields(name: &str, body: String) -> String {
    match name {
        // `copy` collides with the copy-semantics requirement on the
        // generated struct.
        "SDL_StorageInterface" => body.replace("var copy: fn", "var copy_file: fn"),
        _ => body,
    }
}

fn gamepad_binding(doc: Option<&str>) -> String {
    let doc = match doc {
        Some(doc) => format!("    {}", doc_template(doc, "SDL_GamepadBinding", "    ")),
        None => String::new(),
    };
    format!(
        r#"
@fieldwise_init
@register_passable("trivial")
struct GamepadBindingInputAxis(Copyable, Movable):
    var axis: c_int
    var axis_min: c_int
    var axis_max: c_int


@fieldwise_init
@register_passable("trivial")
struct GamepadBindingInputHat(Copyable, Movable):
    var hat: c_int
    var hat_mask: c_int


@fieldwise_init
@register_passable("trivial")
struct GamepadBindingInput(Copyable, Movable):
    alias _mlir_type = __mlir_type[`!pop.union<`, GamepadBindingInputAxis, `, `, GamepadBindingInputHat, `>`]
    var _impl: Self._mlir_type

    @implicit
    fn __init__[T: AnyType](out self, value: T):
        self._impl = rebind[Self._mlir_type](value)

    fn __getitem__[T: AnyType](ref self) -> ref [self] T:
        return rebind[Ptr[T]](Ptr(to=self._impl))[]


@fieldwise_init
@register_passable("trivial")
struct GamepadBindingOutputAxis(Copyable, Movable):
    var axis: GamepadAxis
    var axis_min: c_int
    var axis_max: c_int


@fieldwise_init
@register_passable("trivial")
struct GamepadBindingOutput(Copyable, Movable):
    alias _mlir_type = __mlir_type[`!pop.union<`, GamepadButton, `, `, GamepadBindingOutputAxis, `>`]
    var _impl: Self._mlir_type

    @implicit
    fn __init__[T: AnyType](out self, value: T):
        self._impl = rebind[Self._mlir_type](value)

    fn __getitem__[T: AnyType](ref self) -> ref [self] T:
        return rebind[Ptr[T]](Ptr(to=self._impl))[]


@fieldwise_init
@register_passable("trivial")
struct GamepadBinding(Copyable, Movable):
{doc}    var input_type: GamepadBindingType
    var input: GamepadBindingInput

    var output_type: GamepadBindingType
    var output: GamepadBindingOutput
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamepad_binding_is_registered() {
        let out = override_for("SDL_GamepadBinding", Some("A binding.")).unwrap();
        assert!(out.contains("struct GamepadBindingInput(Copyable, Movable):"));
        assert!(out.contains("https://wiki.libsdl.org/SDL3/SDL_GamepadBinding."));
        assert!(out.contains("var output: GamepadBindingOutput"));
    }

    #[test]
    fn unknown_names_have_no_override() {
        assert!(override_for("SDL_Event", None).is_none());
    }

    #[test]
    fn storage_interface_rename() {
        let body = "    var copy: fn () -> Bool".to_string();
        assert_eq!(
            patch_fields("SDL_StorageInterface", body),
            "    var copy_file: fn () -> Bool"
        );
    }

    #[test]
    fn patch_leaves_other_structs_alone() {
        let body = "    var copy: fn () -> Bool".to_string();
        assert_eq!(patch_fields("SDL_Point", body.clone()), body);
    }
}
