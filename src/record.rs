//! Record：struct 的静态字段描述与可变访问。
//!
//! Rust 无运行时反射；字段列表（名字、tag、是否嵌入、是否可导出）由 [`record!`](crate::record!)
//! 宏在编译期生成，字段映射算法只读取这份描述。

use crate::field_mapper::default_field_map_func;
use crate::value::SqlValue;

/// 字段的值类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 普通值字段。
    Value,
    /// 复合字段（struct 或 `Option<Box<struct>>`），携带内层字段描述。
    Struct(&'static [FieldDesc]),
}

/// 单个字段的描述。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDesc {
    /// 声明名（用于命名推导以及 include/exclude 过滤）。
    pub name: &'static str,
    /// 不可导出的字段不会被映射。
    pub exported: bool,
    /// 匿名嵌入：内层字段会被提升到外层。
    pub embedded: bool,
    /// `db` tag，空串等价于没有 tag。
    pub tag: &'static str,
    pub kind: FieldKind,
}

impl FieldDesc {
    pub const fn value(name: &'static str, tag: &'static str) -> Self {
        Self {
            name,
            exported: true,
            embedded: false,
            tag,
            kind: FieldKind::Value,
        }
    }

    pub const fn private(name: &'static str) -> Self {
        Self {
            name,
            exported: false,
            embedded: false,
            tag: "",
            kind: FieldKind::Value,
        }
    }

    pub const fn nested(name: &'static str, tag: &'static str, fields: &'static [FieldDesc]) -> Self {
        Self {
            name,
            exported: true,
            embedded: false,
            tag,
            kind: FieldKind::Struct(fields),
        }
    }

    pub const fn embedded(
        name: &'static str,
        tag: &'static str,
        fields: &'static [FieldDesc],
    ) -> Self {
        Self {
            name,
            exported: true,
            embedded: true,
            tag,
            kind: FieldKind::Struct(fields),
        }
    }
}

/// 通过 [`Record::ensure_field`] 取得的字段。
pub enum FieldMut<'a> {
    /// 值字段的当前值（快照）。
    Value(SqlValue),
    /// 复合字段，可继续向下访问。
    Record(&'a mut dyn Record),
}

/// 可按字段下标访问的记录。
pub trait Record {
    /// 取第 `index` 个字段（声明顺序）。
    ///
    /// 这是一个“确保并获取”操作：若该字段是为 `None` 的 `Option<Box<T>>` 复合字段，
    /// 会先写入 `T::default()` 再返回，因此需要 `&mut self`。
    /// 不可导出字段和越界下标返回 `None`。
    fn ensure_field(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

/// 记录类型的静态描述。
pub trait RecordType: Record + 'static {
    const FIELDS: &'static [FieldDesc];

    /// 显式表名；为 `None` 时按类型名推导。
    const TABLE_NAME: Option<&'static str> = None;

    fn table_name() -> String {
        match Self::TABLE_NAME {
            Some(name) => name.to_string(),
            None => default_field_map_func(short_type_name::<Self>()),
        }
    }
}

/// 取得 `Option<Box<T>>` 指向的记录，为 `None` 时先分配默认值。
pub fn ensure_boxed<T: Record + Default>(slot: &mut Option<Box<T>>) -> &mut T {
    slot.get_or_insert_with(Box::default)
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// 为业务 struct 实现 [`Record`] 与 [`RecordType`]。
///
/// 每个字段声明 `name`（声明名）、`tag`（`db` tag）以及 `kind`：
///
/// - `value`：普通值，类型需要 `Clone + Into<SqlValue>`
/// - `private`：不可导出，不参与映射
/// - `nested(T)` / `nested_ptr(T)`：具名复合字段，类型分别为 `T` / `Option<Box<T>>`
/// - `embed(T)` / `embed_ptr(T)`：匿名嵌入，类型分别为 `T` / `Option<Box<T>>`
///
/// ```ignore
/// #[derive(Default)]
/// struct Customer { id: i64, name: String, profile: Option<Box<Profile>> }
///
/// halo_dbx::record! {
///     impl Customer as "customers" {
///         id:      { name: "ID",      tag: "pk", kind: value },
///         name:    { name: "Name",    tag: "",   kind: value },
///         profile: { name: "Profile", tag: "",   kind: nested_ptr(Profile) },
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        impl $ty:ty $(as $table:literal)? {
            $(
                $field:ident : { name: $name:literal, tag: $tag:literal, kind: $kind:ident $(($inner:ty))? }
            ),* $(,)?
        }
    ) => {
        impl $crate::record::RecordType for $ty {
            const FIELDS: &'static [$crate::record::FieldDesc] = &[
                $(
                    $crate::record!(@desc $name, $tag, $kind $(, $inner)?)
                ),*
            ];

            $(const TABLE_NAME: Option<&'static str> = Some($table);)?
        }

        impl $crate::record::Record for $ty {
            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn ensure_field(&mut self, index: usize) -> Option<$crate::record::FieldMut<'_>> {
                let mut i = 0_usize;
                $(
                    if index == i {
                        return $crate::record!(@access self, $field, $kind);
                    }
                    i += 1;
                )*
                None
            }
        }
    };

    (@desc $name:literal, $tag:literal, value) => {
        $crate::record::FieldDesc::value($name, $tag)
    };
    (@desc $name:literal, $tag:literal, private) => {
        $crate::record::FieldDesc::private($name)
    };
    (@desc $name:literal, $tag:literal, nested, $inner:ty) => {
        $crate::record::FieldDesc::nested($name, $tag, <$inner as $crate::record::RecordType>::FIELDS)
    };
    (@desc $name:literal, $tag:literal, nested_ptr, $inner:ty) => {
        $crate::record::FieldDesc::nested($name, $tag, <$inner as $crate::record::RecordType>::FIELDS)
    };
    (@desc $name:literal, $tag:literal, embed, $inner:ty) => {
        $crate::record::FieldDesc::embedded($name, $tag, <$inner as $crate::record::RecordType>::FIELDS)
    };
    (@desc $name:literal, $tag:literal, embed_ptr, $inner:ty) => {
        $crate::record::FieldDesc::embedded($name, $tag, <$inner as $crate::record::RecordType>::FIELDS)
    };

    (@access $this:ident, $field:ident, value) => {
        Some($crate::record::FieldMut::Value($crate::value::SqlValue::from(
            $this.$field.clone(),
        )))
    };
    (@access $this:ident, $field:ident, private) => {
        None
    };
    (@access $this:ident, $field:ident, nested) => {
        Some($crate::record::FieldMut::Record(&mut $this.$field))
    };
    (@access $this:ident, $field:ident, embed) => {
        Some($crate::record::FieldMut::Record(&mut $this.$field))
    };
    (@access $this:ident, $field:ident, nested_ptr) => {{
        let inner = $crate::record::ensure_boxed(&mut $this.$field);
        Some($crate::record::FieldMut::Record(inner))
    }};
    (@access $this:ident, $field:ident, embed_ptr) => {{
        let inner = $crate::record::ensure_boxed(&mut $this.$field);
        Some($crate::record::FieldMut::Record(inner))
    }};
}
