// ==========================================
// Teste de integração do painel (filtros + estatísticas)
// ==========================================


use std::sync::Arc;
use test_helpers::{build_importer, create_test_db, open_shared};
use tireforce::api::DashboardApi;
use tireforce::config::IngestConfig;
use tireforce::engine::FilterSpec;
use tireforce::logging;
use tireforce::repository::PriceHistoryRepository;

/// Semeia o banco com um arquivo conhecido e devolve a API do painel
fn seeded_dashboard(db_path: &str) -> DashboardApi {
    let importer = build_importer(db_path);

    let csv = "Marca,Modelo,Medida,Aro,Empresa,Origem,UF,Data,Preço Sell Out (R$),Preço Sell In (R$)\n\
               Pirelli,P1,185/65,R14,Loja A,Nacional,SP,01/03/2025,\"350,00\",\"250,00\"\n\
               Pirelli,P1,185/65,R14,Loja B,Nacional,SP,02/03/2025,\"340,00\",\"250,00\"\n\
               Goodyear,G1,195/60,R15,Loja A,Importado,PR,03/03/2025,\"400,00\",\"300,00\"\n";

    importer.import(csv.as_bytes(), "precos.csv").unwrap();

    let price_repo = Arc::new(PriceHistoryRepository::from_connection(open_shared(db_path)));
    DashboardApi::new(price_repo, Arc::new(IngestConfig::default()))
}

fn spec(region: Option<&str>, brand: Option<&str>, competitor: Option<&str>) -> FilterSpec {
    FilterSpec {
        region: region.map(|v| v.to_string()),
        brand: brand.map(|v| v.to_string()),
        competitor: competitor.map(|v| v.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_list_prices_newest_first() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db();
    let dashboard = seeded_dashboard(&db_path);

    let rows = dashboard.list_prices(&FilterSpec::default()).unwrap();
    assert_eq!(rows.len(), 3);
    // Coleta mais recente primeiro
    assert_eq!(rows[0].brand, "GOODYEAR");
    assert_eq!(rows[0].measure, "195/60 R15");
    assert_eq!(rows[2].competitor, "Loja A");
}

#[test]
fn test_filter_combination_is_order_independent() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db();
    let dashboard = seeded_dashboard(&db_path);

    let both = dashboard
        .list_prices(&spec(Some("SE"), Some("Pirelli"), None))
        .unwrap();

    let region_only = dashboard.list_prices(&spec(Some("SE"), None, None)).unwrap();
    let brand_only = dashboard.list_prices(&spec(None, Some("Pirelli"), None)).unwrap();

    // Interseção das consultas isoladas == consulta combinada,
    // em qualquer ordem de aplicação
    let intersect = |a: &[tireforce::api::PriceRow], b: &[tireforce::api::PriceRow]| {
        a.iter()
            .filter(|row| b.iter().any(|other| other.id == row.id))
            .map(|row| row.id)
            .collect::<Vec<_>>()
    };

    let ids_both: Vec<i64> = both.iter().map(|r| r.id).collect();
    assert_eq!(ids_both, intersect(&region_only, &brand_only));
    assert_eq!(ids_both, intersect(&brand_only, &region_only));
    assert_eq!(both.len(), 2);
}

#[test]
fn test_multi_value_filter() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db();
    let dashboard = seeded_dashboard(&db_path);

    let rows = dashboard
        .list_prices(&spec(None, Some("Pirelli,Goodyear"), None))
        .unwrap();
    assert_eq!(rows.len(), 3);

    let rows = dashboard
        .list_prices(&spec(None, Some("Michelin"), None))
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_all_sentinel_means_no_filter() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db();
    let dashboard = seeded_dashboard(&db_path);

    let rows = dashboard
        .list_prices(&spec(Some("Todas"), Some("todos"), None))
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_stats_over_filtered_set() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db();
    let dashboard = seeded_dashboard(&db_path);

    let stats = dashboard
        .get_stats(&spec(None, None, Some("Loja A")))
        .unwrap();

    assert_eq!(stats.total, 2);
    assert!((stats.mean_price - 375.0).abs() < 1e-9);
    assert_eq!(stats.min_price, 350.0);
    assert_eq!(stats.cheapest_competitor, "Loja A");
}

#[test]
fn test_empty_result_keeps_catalog_lists() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db();
    let dashboard = seeded_dashboard(&db_path);

    let stats = dashboard
        .get_stats(&spec(None, None, Some("Concorrente Inexistente")))
        .unwrap();

    assert_eq!(stats.total, 0);
    assert_eq!(stats.mean_price, 0.0);
    assert_eq!(stats.min_price, 0.0);
    assert_eq!(stats.modal_rim, "-");
    assert_eq!(stats.cheapest_competitor, "-");

    // Listas de seleção continuam vindo do catálogo completo
    assert_eq!(stats.distinct_brands, vec!["GOODYEAR", "PIRELLI"]);
    assert_eq!(stats.distinct_competitors, vec!["Loja A", "Loja B"]);
    assert!(!stats.distinct_widths.is_empty());
}

#[test]
fn test_free_text_search() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db();
    let dashboard = seeded_dashboard(&db_path);

    let rows = dashboard
        .list_prices(&FilterSpec {
            search: Some("goodyear".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].brand, "GOODYEAR");

    // Busca também alcança o nome da empresa concorrente
    let rows = dashboard
        .list_prices(&FilterSpec {
            search: Some("loja b".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_origin_filter() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db();
    let dashboard = seeded_dashboard(&db_path);

    let rows = dashboard
        .list_prices(&FilterSpec {
            origin: Some("IMPORTADO".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].brand, "GOODYEAR");
}
