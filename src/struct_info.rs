//! 字段解析：把记录类型的字段描述展开成“列名 → 字段路径”的映射。
//!
//! 嵌入字段的提升规则：同名列取嵌入深度最浅者；最浅深度上出现多个同名列时全部丢弃，
//! 不做猜测。

use crate::field_mapper::FieldMapperFunc;
use crate::record::{FieldDesc, FieldKind, RecordType};
use crate::tag::{SKIP_TAG, concat, parse_tag};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 从记录根部到目标字段的下标序列。
pub type FieldPath = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("ambiguous column `{column}`: several fields at the same embedding depth map to it")]
    Ambiguous { column: String },
}

/// 解析后的单个字段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// 声明名，嵌套字段以 `.` 连接（匿名嵌入不贡献名字段）。
    pub name: String,
    /// 列名。
    pub db_name: String,
    pub path: FieldPath,
    /// 嵌入深度，顶层为 0。
    pub depth: usize,
    pub primary_key: bool,
}

/// 一个记录类型的列映射。构建后只读，可跨线程共享。
#[derive(Debug, Clone, Default)]
pub struct StructInfo {
    fields: Vec<FieldInfo>,
    by_db_name: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    pk_names: Vec<String>,
    ambiguous: Vec<String>,
    mapped: bool,
}

impl StructInfo {
    /// 为类型 `T` 解析列映射。
    pub fn of<T: RecordType>(mapper: Option<&FieldMapperFunc>) -> Self {
        Self::resolve(T::FIELDS, mapper)
    }

    /// 解析字段描述。
    ///
    /// `mapper` 为 `None` 时不做列名推导，没有 tag 的字段直接使用声明名。
    pub fn resolve(fields: &[FieldDesc], mapper: Option<&FieldMapperFunc>) -> Self {
        let mut candidates = Vec::new();
        collect(fields, &[], 0, "", "", mapper, &mut candidates);

        let (kept, ambiguous) = dominant(&candidates, |f| f.db_name.as_str());
        for column in &ambiguous {
            tracing::debug!(column = %column, "dropping ambiguous column mapping");
        }
        let fields: Vec<FieldInfo> = candidates
            .into_iter()
            .enumerate()
            .filter(|(i, _)| kept.contains(i))
            .map(|(_, f)| f)
            .collect();

        let mut info = StructInfo {
            ambiguous,
            mapped: mapper.is_some(),
            ..Default::default()
        };
        for (i, f) in fields.iter().enumerate() {
            info.by_db_name.insert(f.db_name.clone(), i);
            if f.primary_key {
                info.pk_names.push(f.name.clone());
            }
        }
        // 声明名只作过滤索引，撞名时不影响列映射
        let (named, _) = dominant(&fields, |f| f.name.as_str());
        for i in named {
            info.by_name.insert(fields[i].name.clone(), i);
        }
        info.fields = fields;
        if info.pk_names.is_empty() {
            if let Some(name) = ["ID", "Id"].into_iter().find(|n| info.by_name.contains_key(*n)) {
                info.pk_names.push(name.to_string());
            }
        }
        info
    }

    /// 所有已映射字段，按声明遍历顺序。
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 按列名查找。
    pub fn by_column(&self, db_name: &str) -> Option<&FieldInfo> {
        self.by_db_name.get(db_name).map(|&i| &self.fields[i])
    }

    /// 按声明名查找。
    pub fn by_field_name(&self, name: &str) -> Option<&FieldInfo> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// 列名到字段路径的映射。
    pub fn column_mapping(&self) -> HashMap<&str, &[usize]> {
        self.fields
            .iter()
            .map(|f| (f.db_name.as_str(), f.path.as_slice()))
            .collect()
    }

    /// 主键字段的声明名。
    pub fn pk_names(&self) -> &[String] {
        &self.pk_names
    }

    /// 因歧义被丢弃的列名。
    pub fn ambiguous_columns(&self) -> &[String] {
        &self.ambiguous
    }

    /// 有歧义列时返回错误，供希望严格校验的调用方使用。
    pub fn ensure_unambiguous(&self) -> Result<(), MappingError> {
        match self.ambiguous.first() {
            Some(column) => Err(MappingError::Ambiguous {
                column: column.clone(),
            }),
            None => Ok(()),
        }
    }

    /// 解析时是否提供了命名函数。
    pub fn is_mapped(&self) -> bool {
        self.mapped
    }
}

fn collect(
    fields: &[FieldDesc],
    path: &[usize],
    depth: usize,
    name_prefix: &str,
    db_prefix: &str,
    mapper: Option<&FieldMapperFunc>,
    out: &mut Vec<FieldInfo>,
) {
    for (i, field) in fields.iter().enumerate() {
        if !field.exported || field.tag == SKIP_TAG {
            continue;
        }

        let mut field_path = Vec::with_capacity(path.len() + 1);
        field_path.extend_from_slice(path);
        field_path.push(i);

        let (mut db_name, primary_key) = parse_tag(field.tag);
        if db_name.is_empty() && !field.embedded {
            db_name = match mapper {
                Some(m) => m(field.name),
                None => field.name.to_string(),
            };
        }
        let name = if field.embedded { "" } else { field.name };

        match field.kind {
            FieldKind::Struct(inner) => collect(
                inner,
                &field_path,
                depth + 1,
                &concat(name_prefix, name),
                &concat(db_prefix, &db_name),
                mapper,
                out,
            ),
            FieldKind::Value => out.push(FieldInfo {
                name: concat(name_prefix, name),
                db_name: concat(db_prefix, &db_name),
                path: field_path,
                depth,
                primary_key,
            }),
        }
    }
}

/// 按 key 分组，每组只保留深度唯一最浅的一项。返回保留项的下标（升序）与被丢弃的 key。
fn dominant<'a>(
    fields: &'a [FieldInfo],
    key: impl Fn(&'a FieldInfo) -> &'a str,
) -> (Vec<usize>, Vec<String>) {
    let mut min_depth: HashMap<&str, (usize, usize)> = HashMap::new();
    for f in fields {
        let entry = min_depth.entry(key(f)).or_insert((f.depth, 0));
        if f.depth < entry.0 {
            *entry = (f.depth, 1);
        } else if f.depth == entry.0 {
            entry.1 += 1;
        }
    }

    let mut ambiguous = Vec::new();
    let mut kept = Vec::with_capacity(fields.len());
    for (i, f) in fields.iter().enumerate() {
        let k = key(f);
        let (depth, count) = min_depth[k];
        if f.depth != depth {
            continue;
        }
        if count == 1 {
            kept.push(i);
        } else if !ambiguous.iter().any(|a| a == k) {
            ambiguous.push(k.to_string());
        }
    }
    (kept, ambiguous)
}

/// 按类型缓存 [`StructInfo`]，绑定一个命名函数。
pub struct StructInfoCache {
    mapper: Option<FieldMapperFunc>,
    infos: Mutex<HashMap<TypeId, Arc<StructInfo>>>,
}

impl std::fmt::Debug for StructInfoCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // mapper 无法 Debug
        f.debug_struct("StructInfoCache")
            .field("mapped", &self.mapper.is_some())
            .finish()
    }
}

impl StructInfoCache {
    pub fn new(mapper: Option<FieldMapperFunc>) -> Self {
        Self {
            mapper,
            infos: Mutex::new(HashMap::new()),
        }
    }

    pub fn mapper(&self) -> Option<&FieldMapperFunc> {
        self.mapper.as_ref()
    }

    /// 取 `T` 的列映射，首次访问时解析。
    pub fn get<T: RecordType>(&self) -> Arc<StructInfo> {
        let mut infos = self.infos.lock().unwrap_or_else(|e| e.into_inner());
        infos
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                tracing::debug!(record = std::any::type_name::<T>(), "resolving struct info");
                Arc::new(StructInfo::of::<T>(self.mapper.as_ref()))
            })
            .clone()
    }
}
