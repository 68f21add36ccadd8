use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use slotcraft_core::ItemId;
use slotcraft_infra::seed::{self, PLANKS_RECIPE, STICK, WOOD};
use slotcraft_infra::{InMemoryInventoryStore, InventoryStore};
use slotcraft_inventory::{
    AddItem, Craft, InventoryCommand, InventorySlot, MoveStack, WorkingSet, allocate, execute,
};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

/// Fragmented inventory: `n` stacks of 3 wood, the rest free.
fn fragmented(n: i32) -> Vec<InventorySlot> {
    (0..n).map(|i| InventorySlot::new(i, WOOD, 3)).collect()
}

fn bench_allocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate");

    for stacks in [0, 12, 30] {
        let slots = fragmented(stacks);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("wood_64", stacks), &slots, |b, slots| {
            b.iter(|| allocate(black_box(WOOD), black_box(64), 64, black_box(slots)))
        });
    }

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let catalog = seed::starter_catalog().unwrap();
    let mut group = c.benchmark_group("engine");

    let committed = seed::starter_slots();
    let swap: InventoryCommand = MoveStack {
        from_slot: 0,
        to_slot: 1,
    }
    .into();
    group.bench_function("move_swap", |b| {
        b.iter(|| {
            let mut uow = WorkingSet::from_slots(committed.iter().cloned()).unwrap();
            execute(&catalog, &mut uow, black_box(&swap)).unwrap()
        })
    });

    let craft: InventoryCommand = Craft {
        recipe_id: PLANKS_RECIPE,
    }
    .into();
    group.bench_function("craft_planks", |b| {
        b.iter(|| {
            let mut uow = WorkingSet::from_slots(committed.iter().cloned()).unwrap();
            execute(&catalog, &mut uow, black_box(&craft)).unwrap()
        })
    });

    group.finish();
}

fn bench_store_throughput(c: &mut Criterion) {
    let rt = runtime();
    let catalog = seed::starter_catalog().unwrap();
    let mut group = c.benchmark_group("in_memory_store");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_then_drop_overflow", |b| {
        let store = InMemoryInventoryStore::with_slots(seed::starter_slots()).unwrap();
        b.iter(|| {
            rt.block_on(async {
                store
                    .execute(
                        &catalog,
                        &AddItem {
                            item_id: STICK,
                            amount: 1,
                        }
                        .into(),
                    )
                    .await
                    .unwrap();
                // Keep the store from filling up across iterations.
                store
                    .execute(
                        &catalog,
                        &slotcraft_inventory::DropStack {
                            slot_index: 3,
                            amount: None,
                        }
                        .into(),
                    )
                    .await
                    .unwrap();
            })
        })
    });

    group.bench_function("craft_rejected", |b| {
        let store = InMemoryInventoryStore::with_slots(vec![InventorySlot::new(0, ItemId::new(2), 1)])
            .unwrap();
        b.iter(|| {
            rt.block_on(async {
                store
                    .execute(
                        &catalog,
                        &Craft {
                            recipe_id: PLANKS_RECIPE,
                        }
                        .into(),
                    )
                    .await
                    .unwrap_err()
            })
        })
    });

    group.finish();
}

criterion_group!(benches, bench_allocate, bench_engine, bench_store_throughput);
criterion_main!(benches);
