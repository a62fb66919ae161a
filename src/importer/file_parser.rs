// ==========================================
// TireForce - Leitor de arquivos tabulares
// ==========================================
// Entrada da ingestão: bytes brutos + nome do arquivo.
// Suporta: CSV (vírgula ou ponto-e-vírgula) / Excel (.xlsx/.xls)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{Reader, Xlsx};
use csv::ReaderBuilder;
use std::io::Cursor;

// ==========================================
// ParsedTable - Tabela bruta
// ==========================================
// Cabeçalhos preservados por posição: planilhas reais trazem colunas
// de nome repetido (ex.: duas colunas "Marca"), então o acesso às
// células é por índice, nunca por nome
#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ==========================================
// CsvParser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// Detecta o delimitador pela primeira linha (vírgula ou ponto-e-vírgula)
    fn sniff_delimiter(bytes: &[u8]) -> u8 {
        let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or(&[]);
        let commas = first_line.iter().filter(|b| **b == b',').count();
        let semicolons = first_line.iter().filter(|b| **b == b';').count();
        if semicolons > commas {
            b';'
        } else {
            b','
        }
    }

    pub fn parse(&self, bytes: &[u8]) -> ImportResult<ParsedTable> {
        let delimiter = Self::sniff_delimiter(bytes);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // linhas de comprimento desigual são toleradas
            .delimiter(delimiter)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::UnreadableFile(
                "arquivo sem linha de cabeçalho".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row: Vec<String> =
                record.iter().map(|v| v.trim().to_string()).collect();
            // Normaliza o comprimento para o número de colunas do cabeçalho
            row.resize(headers.len(), String::new());

            // Pula linhas totalmente em branco
            if row.iter().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(ParsedTable { headers, rows })
    }
}

// ==========================================
// ExcelParser
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    pub fn parse(&self, bytes: &[u8]) -> ImportResult<ParsedTable> {
        let cursor = Cursor::new(bytes.to_vec());
        let mut workbook: Xlsx<_> = Xlsx::new(cursor)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        // Primeira planilha do arquivo
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(
                "planilha Excel sem abas".to_string(),
            ));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut rows_iter = range.rows();
        let header_row = rows_iter.next().ok_or_else(|| {
            ImportError::ExcelParseError("planilha Excel sem linha de dados".to_string())
        })?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for data_row in rows_iter {
            let mut row: Vec<String> = data_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();
            row.resize(headers.len(), String::new());

            if row.iter().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(ParsedTable { headers, rows })
    }
}

// ==========================================
// Leitor universal (escolha pela extensão)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse(&self, bytes: &[u8], filename: &str) -> ImportResult<ParsedTable> {
        if bytes.is_empty() {
            return Err(ImportError::UnreadableFile("arquivo vazio".to_string()));
        }

        let ext = filename
            .rsplit('.')
            .next()
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse(bytes),
            "xlsx" | "xls" => ExcelParser.parse(bytes),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
