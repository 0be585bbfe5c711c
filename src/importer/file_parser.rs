// ==========================================
// 产线工装管理系统 - 文件解析器实现
// ==========================================
// 职责: 阶段 0,把外部文件解析为原始行表
// 支持: CSV (.csv) / Excel (.xlsx/.xls)
// 引号约定: 字段可带双引号,内嵌引号以 "" 转义,
//           引号内允许分隔符与换行（csv crate 原生支持）
// 行号约定: 表头为第 1 行,首个数据行为第 2 行,
//           空白行跳过后按解析顺序连续编号
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// RawRow / RawTable - 原始行表
// ==========================================

/// 一个已解析数据行: 列名 → 原文值（已 trim）
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 文件内的人读行号（表头=1,首个数据行=2）
    pub row_number: usize,
    pub values: HashMap<String, String>,
}

impl RawRow {
    /// 按列名取值,缺列按空串处理
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }
}

/// 解析产物: 表头 + 数据行（保持输入顺序）
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

// ==========================================
// CsvParser - CSV 解析器
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从内存文本解析（纯函数,校验服务直接使用,保证确定性）
    pub fn parse_str(content: &str) -> ImportResult<RawTable> {
        if content.trim().is_empty() {
            return Err(ImportError::Parse(
                "File is empty or could not be read".to_string(),
            ));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::Parse(format!("表头读取失败: {}", e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::Parse(
                "Invalid file structure: No headers found".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut values = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    values.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if values.values().all(|v| v.is_empty()) {
                continue;
            }

            // 行号在跳过空行后连续编号
            rows.push(RawRow {
                row_number: rows.len() + 2,
                values,
            });
        }

        Ok(RawTable { headers, rows })
    }

    /// 从文件解析（一次性读完,无流式需求,文件规模受 UI 使用约束）
    pub fn parse_path(path: &Path) -> ImportResult<RawTable> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse_str(&content)
    }
}

// ==========================================
// ExcelParser - Excel 解析器
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    pub fn parse_path(path: &Path) -> ImportResult<RawTable> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError("Excel 文件无工作表".to_string()));
        }

        // 只读第一个 sheet
        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut sheet_rows = range.rows();
        let header_row = sheet_rows.next().ok_or_else(|| {
            ImportError::Parse("File is empty or could not be read".to_string())
        })?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for data_row in sheet_rows {
            let mut values = HashMap::new();
            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    values.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            if values.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(RawRow {
                row_number: rows.len() + 2,
                values,
            });
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser::parse_path(path),
            "xlsx" | "xls" => ExcelParser::parse_path(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_str_basic() {
        let table = CsvParser::parse_str(
            "Family Name,Family Code,Status\nVW FRONT BUMPER 699,VW-FB-699,active\n",
        )
        .unwrap();

        assert_eq!(table.headers, vec!["Family Name", "Family Code", "Status"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].row_number, 2);
        assert_eq!(table.rows[0].get("Family Code"), "VW-FB-699");
    }

    #[test]
    fn test_parse_str_quoted_fields() {
        // 引号内的分隔符与转义引号
        let table = CsvParser::parse_str(
            "Family Name,Comment\n\"BUMPER, FRONT\",\"he said \"\"ok\"\"\"\n",
        )
        .unwrap();

        assert_eq!(table.rows[0].get("Family Name"), "BUMPER, FRONT");
        assert_eq!(table.rows[0].get("Comment"), "he said \"ok\"");
    }

    #[test]
    fn test_parse_str_quoted_newline() {
        let table =
            CsvParser::parse_str("Name,Comment\nA,\"line1\nline2\"\nB,plain\n").unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("Comment"), "line1\nline2");
        assert_eq!(table.rows[1].row_number, 3);
    }

    #[test]
    fn test_parse_str_empty_input() {
        let err = CsvParser::parse_str("   \n  ").unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
    }

    #[test]
    fn test_parse_str_skips_blank_rows() {
        let table = CsvParser::parse_str("Name,Code\nA,1\n,\nB,2\n").unwrap();
        assert_eq!(table.rows.len(), 2);
        // 空行跳过后连续编号
        assert_eq!(table.rows[1].row_number, 3);
        assert_eq!(table.rows[1].get("Name"), "B");
    }

    #[test]
    fn test_parse_path_missing_file() {
        let err = CsvParser::parse_path(Path::new("non_existent.csv")).unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let err = UniversalFileParser::parse("data.txt").unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    }
}
