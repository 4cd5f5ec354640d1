//! Field mapper：把 struct 字段名映射为列名。

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

/// 字段名映射函数类型。`Option<FieldMapperFunc>` 为 `None` 时表示不做推导，直接使用原始字段名。
pub type FieldMapperFunc = Arc<dyn Fn(&str) -> String + Send + Sync + 'static>;

/// 默认命名规则：`CamelCase` 转 `snake_case`。
///
/// 仅在“前一个字符既不是大写字母也不是 `_`”时于大写字母前插入 `_`，
/// 因此连续大写会被视为一个词：`MyURLPath` => `my_urlpath`，`UserID` => `user_id`。
/// 开头的 `_` 原样保留。
pub fn default_field_map_func(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| !p.is_ascii_uppercase() && p != '_') {
            out.push('_');
        }
        out.extend(c.to_lowercase());
        prev = Some(c);
    }

    out
}

static DEFAULT_MAP_FUNC: OnceLock<FieldMapperFunc> = OnceLock::new();

/// 以 `FieldMapperFunc` 形式返回 [`default_field_map_func`]。
pub fn snake_case_mapper() -> FieldMapperFunc {
    DEFAULT_MAP_FUNC
        .get_or_init(|| Arc::new(default_field_map_func))
        .clone()
}

static DEFAULT_FIELD_MAPPER: OnceLock<Mutex<Option<FieldMapperFunc>>> = OnceLock::new();
static DEFAULT_FIELD_MAPPER_LOCK: Mutex<()> = Mutex::new(());

fn mapper_cell() -> &'static Mutex<Option<FieldMapperFunc>> {
    DEFAULT_FIELD_MAPPER.get_or_init(|| Mutex::new(Some(snake_case_mapper())))
}

/// 获取当前全局默认 FieldMapper（初始为 [`snake_case_mapper`]）。
pub fn default_field_mapper() -> Option<FieldMapperFunc> {
    mapper_cell()
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// 设置全局默认 FieldMapper，返回旧值。
pub fn set_default_field_mapper(mapper: Option<FieldMapperFunc>) -> Option<FieldMapperFunc> {
    let mut g = mapper_cell().lock().unwrap_or_else(|e| e.into_inner());
    std::mem::replace(&mut *g, mapper)
}

/// 修改全局默认 FieldMapper 的 RAII guard（会持有一个全局锁，避免并行测试互相干扰）。
pub struct DefaultFieldMapperGuard {
    _lock: MutexGuard<'static, ()>,
    old: Option<FieldMapperFunc>,
}

impl Drop for DefaultFieldMapperGuard {
    fn drop(&mut self) {
        let _ = set_default_field_mapper(self.old.take());
    }
}

/// 在一个作用域内临时设置默认 FieldMapper，并保证退出作用域后自动恢复。
pub fn set_default_field_mapper_scoped(mapper: Option<FieldMapperFunc>) -> DefaultFieldMapperGuard {
    let lock = DEFAULT_FIELD_MAPPER_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let old = set_default_field_mapper(mapper);
    DefaultFieldMapperGuard { _lock: lock, old }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_field_map_func_cases() {
        let cases = [
            ("Name", "name"),
            ("FirstName", "first_name"),
            ("Name0", "name0"),
            ("ID", "id"),
            ("UserID", "user_id"),
            ("User0ID", "user0_id"),
            ("MyURL", "my_url"),
            ("URLPath", "urlpath"),
            ("MyURLPath", "my_urlpath"),
            ("First_Name", "first_name"),
            ("first_name", "first_name"),
            ("_FirstName", "_first_name"),
            ("_First_Name", "_first_name"),
        ];
        for (input, output) in cases {
            assert_eq!(default_field_map_func(input), output, "{input}");
        }
    }

    #[test]
    fn default_field_map_func_lowercases_everything() {
        for input in ["ABC", "aBcDeF", "X1Y2Z3", "Émile", ""] {
            let out = default_field_map_func(input);
            assert_eq!(out, out.to_lowercase(), "{input}");
            assert_eq!(out, default_field_map_func(input));
        }
    }

    #[test]
    fn scoped_default_mapper_can_disable_mapping() {
        let _g = set_default_field_mapper_scoped(None);
        assert!(default_field_mapper().is_none());
    }

    #[test]
    fn scoped_default_mapper_can_be_replaced() {
        let upper: FieldMapperFunc = Arc::new(|s: &str| s.to_ascii_uppercase());
        let _g = set_default_field_mapper_scoped(Some(upper));
        let m = default_field_mapper().expect("mapper");
        assert_eq!(m("name"), "NAME");
    }
}
