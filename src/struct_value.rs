//! StructValue：从记录实例中取出列值，用于 INSERT/UPDATE。

use crate::field_mapper::FieldMapperFunc;
use crate::record::{FieldMut, Record, RecordType};
use crate::struct_info::{FieldInfo, StructInfo};
use crate::value::SqlValue;
use std::collections::HashMap;
use std::sync::Arc;

/// 记录实例与其列映射的绑定。
///
/// 读取字段时会把路径上为 `None` 的 `Option<Box<T>>` 复合字段替换为默认值，
/// 因此需要对记录的独占访问。
pub struct StructValue<'a> {
    value: &'a mut dyn Record,
    info: Arc<StructInfo>,
    table_name: String,
}

impl<'a> StructValue<'a> {
    /// 使用给定命名函数解析 `T` 的列映射并绑定实例。
    pub fn new<T: RecordType>(value: &'a mut T, mapper: Option<&FieldMapperFunc>) -> Self {
        Self::with_info(value, Arc::new(StructInfo::of::<T>(mapper)))
    }

    /// 绑定一份已解析（通常来自缓存）的列映射。
    pub fn with_info<T: RecordType>(value: &'a mut T, info: Arc<StructInfo>) -> Self {
        Self {
            value,
            info,
            table_name: T::table_name(),
        }
    }

    pub fn info(&self) -> &StructInfo {
        &self.info
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// 取出列值。
    ///
    /// `include` 非空时只保留声明名在其中的字段；随后再移除声明名在 `exclude` 中的字段。
    /// 两者同时给出时 exclude 不会被 include 覆盖：`columns(&["ID", "Name"], &["ID"])` 只剩 `name`，
    /// 沿用 dbx 记录取值的既有行为。
    /// 两个过滤都按字段的声明名精确匹配（区分大小写），与是否启用命名函数无关。
    /// 结果的 key：解析时提供了命名函数则为列名，否则为声明名。零值字段同样返回。
    pub fn columns(&mut self, include: &[&str], exclude: &[&str]) -> HashMap<String, SqlValue> {
        let info = Arc::clone(&self.info);
        let mut out = HashMap::with_capacity(info.len());

        let selected: Vec<&FieldInfo> = if include.is_empty() {
            info.fields().iter().collect()
        } else {
            include
                .iter()
                .filter_map(|name| info.by_field_name(name))
                .collect()
        };

        for f in selected {
            if exclude.contains(&f.name.as_str()) {
                continue;
            }
            if let Some(v) = read_path(&mut *self.value, &f.path) {
                out.insert(self.key_of(f), v);
            }
        }
        out
    }

    /// 主键列值。
    pub fn pk(&mut self) -> HashMap<String, SqlValue> {
        let info = Arc::clone(&self.info);
        let mut out = HashMap::with_capacity(info.pk_names().len());
        for name in info.pk_names() {
            let Some(f) = info.by_field_name(name) else {
                continue;
            };
            if let Some(v) = read_path(&mut *self.value, &f.path) {
                out.insert(self.key_of(f), v);
            }
        }
        out
    }

    fn key_of(&self, f: &FieldInfo) -> String {
        if self.info.is_mapped() {
            f.db_name.clone()
        } else {
            f.name.clone()
        }
    }
}

/// 沿路径取值，途经的空指针字段会被分配默认值。
fn read_path(record: &mut (dyn Record + '_), path: &[usize]) -> Option<SqlValue> {
    let (&first, rest) = path.split_first()?;
    match record.ensure_field(first)? {
        FieldMut::Value(v) if rest.is_empty() => Some(v),
        FieldMut::Record(inner) if !rest.is_empty() => read_path(inner, rest),
        _ => None,
    }
}
