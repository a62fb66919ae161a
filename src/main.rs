// ==========================================
// TireForce - Entrada de linha de comando
// ==========================================
// Invólucro fino sobre a camada de API: importa planilhas e consulta
// o painel. A camada de transporte de rede fica fora deste binário.
// ==========================================

use std::process::exit;
use std::sync::{Arc, Mutex};

use tireforce::api::{DashboardApi, ImportApi};
use tireforce::config::IngestConfig;
use tireforce::engine::FilterSpec;
use tireforce::importer::PriceImporter;
use tireforce::repository::{PriceHistoryRepository, ProductRepository};

fn print_usage() {
    eprintln!("Uso:");
    eprintln!("  tireforce <banco.db> importar <arquivo...>");
    eprintln!("  tireforce <banco.db> painel [filtro-json]");
    eprintln!("  tireforce <banco.db> estatisticas [filtro-json]");
    eprintln!();
    eprintln!("Exemplo de filtro: '{{\"regiao\":\"SE\",\"marca\":\"Pirelli,Goodyear\"}}'");
}

fn main() {
    tireforce::logging::init();

    tracing::info!("==================================================");
    tracing::info!("TireForce - Inteligência de preços de pneus");
    tracing::info!("Versão: {}", tireforce::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        print_usage();
        exit(1);
    }

    if let Err(e) = run(&args[0], &args[1], &args[2..]) {
        tracing::error!(error = %e, "execução falhou");
        eprintln!("Erro: {}", e);
        exit(1);
    }
}

fn run(db_path: &str, command: &str, rest: &[String]) -> anyhow::Result<()> {
    // Conexão compartilhada com PRAGMA unificado + esquema garantido
    let conn = tireforce::db::open_sqlite_connection(db_path)?;
    tireforce::db::init_schema(&conn)?;
    let shared = Arc::new(Mutex::new(conn));

    let config = Arc::new(IngestConfig::default());
    let product_repo = Arc::new(ProductRepository::from_connection(shared.clone()));
    let price_repo = Arc::new(PriceHistoryRepository::from_connection(shared));

    match command {
        "importar" => {
            if rest.is_empty() {
                anyhow::bail!("nenhum arquivo informado");
            }
            let importer = Arc::new(PriceImporter::new(
                config,
                product_repo,
                price_repo,
            ));
            let api = ImportApi::new(importer);

            for path in rest {
                let bytes = std::fs::read(path)?;
                let filename = std::path::Path::new(path)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(path);

                match api.upload(&bytes, filename) {
                    Ok(summary) => {
                        println!("{}", serde_json::to_string_pretty(&summary)?);
                    }
                    Err(e) => {
                        // Um arquivo ruim não interrompe a fila de importação
                        tracing::error!(arquivo = %path, error = %e, "arquivo rejeitado");
                        eprintln!("Arquivo {} rejeitado: {}", path, e);
                    }
                }
            }
            Ok(())
        }
        "painel" => {
            let spec = parse_filter(rest)?;
            let api = DashboardApi::new(price_repo, config);
            let rows = api.list_prices(&spec)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
            Ok(())
        }
        "estatisticas" => {
            let spec = parse_filter(rest)?;
            let api = DashboardApi::new(price_repo, config);
            let stats = api.get_stats(&spec)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("comando desconhecido: {}", other)
        }
    }
}

fn parse_filter(rest: &[String]) -> anyhow::Result<FilterSpec> {
    match rest.first() {
        None => Ok(FilterSpec::default()),
        Some(raw) => Ok(serde_json::from_str(raw)?),
    }
}
