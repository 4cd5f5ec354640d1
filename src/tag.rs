//! `db` tag 解析。

/// tag 中标记主键的保留字。
pub const PK_TOKEN: &str = "pk";

/// tag 值为 `-` 时该字段不参与映射。
pub const SKIP_TAG: &str = "-";

/// 解析 tag，返回 `(显式列名, 是否主键)`。
///
/// 逗号分隔，`pk` 表示主键，其余非空 token 视为列名（多个时后者覆盖前者）。
/// 解析是宽松的：任何其他内容都会被当成列名，不存在“非法 tag”。
pub fn parse_tag(tag: &str) -> (String, bool) {
    let mut name = "";
    let mut pk = false;
    for token in tag.split(',') {
        let token = token.trim();
        if token == PK_TOKEN {
            pk = true;
        } else if !token.is_empty() {
            name = token;
        }
    }
    (name.to_string(), pk)
}

/// 用 `.` 连接前缀与名字，任一侧为空时不加 `.`。
pub fn concat(prefix: &str, name: &str) -> String {
    match (prefix.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}.{name}"),
    }
}
