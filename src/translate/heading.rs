//! File heading: license banner plus module docstring.

use regex::Regex;
use std::sync::LazyLock;

static RE_LICENSE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(?:  )?").unwrap());

static RE_FILEDOC_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^ \* ?").unwrap());

const RULE: &str = "# x--------------------------------------------------------------------------x #";

pub fn translate(license: &str, filedoc: &str) -> String {
    let license = RE_LICENSE_LINE.replace_all(license, "# | ");
    let filedoc = RE_FILEDOC_LINE.replace_all(filedoc, "");
    format!(
        "{RULE}\n# | SDL3 Bindings in Mojo\n{RULE}\n{license}\n{RULE}\n\n\"\"\"{filedoc}\n\"\"\"\n"
    )
}
