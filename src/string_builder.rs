//! SQL 片段拼接工具。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    /// 写入 `s`；如果不是首次写入，会先写入一个空格。空串忽略。
    pub(crate) fn write_leading(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
        self.buf.push_str(s);
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// 写入以 `sep` 分隔的 `items`，跳过空串。
    pub(crate) fn write_strings(&mut self, items: &[String], sep: &str) {
        let mut first_added = false;
        for s in items {
            if s.is_empty() {
                continue;
            }
            if first_added {
                self.buf.push_str(sep);
            }
            self.buf.push_str(s);
            first_added = true;
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::StringBuilder;

    #[test]
    fn write_leading_separates_with_single_space() {
        let mut b = StringBuilder::new();
        b.write_leading("a");
        b.write_leading("");
        b.write_leading("b");
        assert_eq!(b.into_string(), "a b");
    }

    #[test]
    fn write_strings_skips_empty_items() {
        let mut b = StringBuilder::new();
        b.write_strings(&["x".to_string(), String::new(), "y".to_string()], ", ");
        assert_eq!(b.into_string(), "x, y");
    }
}
