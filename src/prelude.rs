//! The aggregate `__init__.mojo` entry module.
//!
//! Re-exports every generated header module and carries the shared runtime
//! plumbing: the pointer alias, the lazily loaded native library handle,
//! and the fixed-array helper the type mapper leans on. Loading never
//! crashes at import time; a missing library yields an uninitialized
//! handle and the failure surfaces at the first call that needs it.

const RULE: &str = "# x--------------------------------------------------------------------------x #";

pub fn init_module(modules: &[String]) -> String {
    let mut out = format!(
        "\n{RULE}\n# | SDL3 Bindings in Mojo\n{RULE}\n\n\"\"\"SDL3 Bindings in Mojo\"\"\"\n\n"
    );
    for module in modules {
        out.push_str(&format!("from .{module} import *\n"));
    }
    out.push_str(BOOTSTRAP);
    out
}

const BOOTSTRAP: &str = r#"

alias Ptr = stdlib.memory.UnsafePointer


from sys import os_is_linux, os_is_macos, is_little_endian, is_big_endian
from sys.ffi import _Global, _OwnedDLHandle, _get_dylib_function, c_char, c_uchar, c_int, c_uint, c_short, c_ushort, c_long, c_long_long, c_size_t, c_ssize_t, c_float, c_double

alias lib = _Global["SDL", _OwnedDLHandle, _init_sdl_handle]()

fn _init_sdl_handle() -> _OwnedDLHandle:
    try:
        @parameter
        if os_is_macos():
            return _OwnedDLHandle(".pixi/envs/default/lib/libSDL3.dylib")
        elif os_is_linux():
            return _OwnedDLHandle(".pixi/envs/default/lib/libSDL3.so")
        else:
            constrained[False, "OS is not supported"]()
            return _uninit[_OwnedDLHandle]()
    except:
        print("libSDL3 not found at .pixi/envs/default/lib/")
        return _uninit[_OwnedDLHandle]()


@always_inline
fn _uninit[T: AnyType](out value: T):
    """Returns uninitialized data."""
    __mlir_op.`lit.ownership.mark_initialized`(__get_mvalue_as_litref(value))


struct ArrayHelper[type: Copyable & Movable, size: Int, *, mut: Bool = True]:
    alias result = Ptr[InlineArray[type, size], mut = mut]
"#;
